use httpmock::prelude::*;
use serde_json::json;
use sgrh_cli::{build_record, ApiClient, ApiFailure, ClientConfig, EmployeeRecord, ValidationError};
use std::collections::HashMap;
use std::time::Duration;

fn client_for(server: &MockServer) -> ApiClient {
    let config = ClientConfig::new(&server.base_url())
        .unwrap()
        .with_timeout(Some(Duration::from_secs(5)));
    ApiClient::new(&config).unwrap()
}

fn salaried(id: &str, name: &str, salary: &str) -> EmployeeRecord {
    let fields = HashMap::from([("salario_mensal".to_string(), salary.to_string())]);
    build_record(id, name, "efetivo", &fields).unwrap()
}

#[test]
fn add_employee_posts_serialized_record_and_returns_created_body() {
    let server = MockServer::start();
    let record = json!({"tipo": "efetivo", "id": 1, "nome": "Ana", "salario_mensal": 5000.0});
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/departamentos/TI/colaboradores")
            .json_body(record.clone());
        then.status(201)
            .header("Content-Type", "application/json")
            .json_body(record.clone());
    });

    let api = client_for(&server);
    let result = api.add_employee("TI", &salaried("1", "Ana", "5000.0"));

    mock.assert();
    let payload = result.unwrap().unwrap();
    assert_eq!(payload, record);
    let echoed: EmployeeRecord = serde_json::from_value(payload).unwrap();
    assert_eq!(echoed, salaried("1", "Ana", "5000"));
}

#[test]
fn add_employee_accepts_plain_text_reply() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/departamentos/RH/colaboradores");
        then.status(201).body("Colaborador adicionado com sucesso!");
    });

    let api = client_for(&server);
    let fields = HashMap::from([
        ("horas_trabalhadas".to_string(), "40".to_string()),
        ("valor_hora".to_string(), "25.5".to_string()),
    ]);
    let record = build_record("2", "Caio", "autonomo", &fields).unwrap();
    let result = api.add_employee("RH", &record);

    mock.assert();
    assert_eq!(result, Ok(Some(json!("Colaborador adicionado com sucesso!"))));
}

#[test]
fn remove_employee_no_content_is_synthetic_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/departamentos/TI/colaboradores/1");
        then.status(204);
    });

    let api = client_for(&server);
    let result = api.remove_employee("TI", 1);

    mock.assert();
    assert_eq!(
        result,
        Ok(Some(json!({"success": true, "message": "operation completed"})))
    );
}

#[test]
fn list_employees_with_empty_body_is_absent_payload() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/departamentos/RH/colaboradores");
        then.status(200);
    });

    let api = client_for(&server);
    let result = api.list_employees("RH");

    mock.assert();
    assert_eq!(result, Ok(None));
}

#[test]
fn list_employees_returns_array() {
    let server = MockServer::start();
    let employees = json!([
        {"Id": 1, "Nome": "Ana", "SalarioMensal": 5000.0},
        {"Id": 2, "Nome": "Caio", "HorasTrabalhadas": 40, "ValorHora": 25.5}
    ]);
    let mock = server.mock(|when, then| {
        when.method(GET).path("/departamentos/TI/colaboradores");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(employees.clone());
    });

    let api = client_for(&server);
    let result = api.list_employees("TI");

    mock.assert();
    assert_eq!(result, Ok(Some(employees)));
}

#[test]
fn repeated_get_yields_same_shape() {
    let server = MockServer::start();
    let summary = json!({"departamento": "TI", "total_folha_salarial": 6020.0});
    let mock = server.mock(|when, then| {
        when.method(GET).path("/departamentos/TI/folha-salarial");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(summary.clone());
    });

    let api = client_for(&server);
    let first = api.compute_payroll("TI");
    let second = api.compute_payroll("TI");

    mock.assert_hits(2);
    assert_eq!(first, Ok(Some(summary)));
    assert_eq!(first, second);
}

#[test]
fn error_status_becomes_failure_with_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/departamentos/XX/folha-salarial");
        then.status(404).body("Departamento não encontrado\n");
    });

    let api = client_for(&server);
    let failure = api.compute_payroll("XX").unwrap_err();

    mock.assert();
    assert_eq!(failure.status(), Some(reqwest::StatusCode::NOT_FOUND));
    assert_eq!(failure.to_string(), "404 Not Found - Departamento não encontrado");
}

#[test]
fn server_error_is_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/departamentos/TI/colaboradores/9");
        then.status(500);
    });

    let api = client_for(&server);
    assert!(matches!(
        api.remove_employee("TI", 9),
        Err(ApiFailure::Status { .. })
    ));
}

#[test]
fn unreachable_backend_is_a_connection_failure() {
    // Port 1 is reserved and nothing listens on it.
    let config = ClientConfig::new("http://127.0.0.1:1")
        .unwrap()
        .with_timeout(Some(Duration::from_secs(2)));
    let api = ApiClient::new(&config).unwrap();

    let failure = api
        .add_employee("TI", &salaried("1", "Ana", "5000"))
        .unwrap_err();

    assert!(matches!(failure, ApiFailure::Transport(_)));
    assert!(failure.to_string().to_lowercase().contains("connection"));
}

#[test]
fn invalid_id_fails_before_any_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.any_request();
        then.status(201);
    });

    let fields = HashMap::from([("salario_mensal".to_string(), "5000".to_string())]);
    let built = build_record("abc", "Ana", "efetivo", &fields);

    assert_eq!(built, Err(ValidationError::InvalidId("abc".to_string())));
    mock.assert_hits(0);
}

#[test]
fn timeout_is_a_transport_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/departamentos/TI/folha-salarial");
        then.status(200)
            .delay(Duration::from_secs(2))
            .json_body(json!({"departamento": "TI", "total_folha_salarial": 0.0}));
    });

    let config = ClientConfig::new(&server.base_url())
        .unwrap()
        .with_timeout(Some(Duration::from_millis(300)));
    let api = ApiClient::new(&config).unwrap();

    let result = api.compute_payroll("TI");

    assert!(matches!(result, Err(ApiFailure::Transport(_))), "got {:?}", result);
}

#[test]
fn dot_segment_department_sends_nothing() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.any_request();
        then.status(204);
    });

    let api = client_for(&server);

    assert_eq!(
        api.remove_employee("..", 1),
        Err(ApiFailure::InvalidDepartment("..".to_string()))
    );
    assert_eq!(
        api.list_employees("."),
        Err(ApiFailure::InvalidDepartment(".".to_string()))
    );
    mock.assert_hits(0);
}
