use std::time::Duration;

use operadoras::api::{ApiClient, ApiError, DEFAULT_TIMEOUT, OperadorasApi};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), DEFAULT_TIMEOUT).unwrap()
}

fn listing_body(page: u32, count: usize, total: u64, total_pages: u32) -> serde_json::Value {
    let data: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "registro_ans": format!("{:06}", i),
                "cnpj": format!("{:014}", i),
                "razao_social": format!("Operadora {i}"),
                "modalidade": "Cooperativa Médica",
                "uf": "SP",
                "data_cadastro": null
            })
        })
        .collect();
    json!({
        "data": data,
        "total": total,
        "page": page,
        "limit": 10,
        "total_pages": total_pages
    })
}

/// Query pairs of every request the server has seen.
async fn received_queries(server: &MockServer) -> Vec<Vec<(String, String)>> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.query_pairs().into_owned().collect())
        .collect()
}

async fn error_for_status(status: u16, body: serde_json::Value) -> ApiError {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/estatisticas"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    client_for(&server).get_estatisticas().await.unwrap_err()
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_listing_without_search_omits_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/operadoras"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(1, 10, 25, 3)))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).get_operadoras(1, 10, "").await.unwrap();

    assert_eq!(page.data.len(), 10);
    assert_eq!(page.total, 25);
    assert_eq!(page.total_pages, 3);

    let queries = received_queries(&server).await;
    assert_eq!(queries.len(), 1);
    assert!(queries[0].iter().all(|(k, _)| k != "search"));
}

#[tokio::test]
async fn test_listing_with_search_sends_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/operadoras"))
        .and(query_param("search", "unimed sul"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(2, 3, 13, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .get_operadoras(2, 10, "unimed sul")
        .await
        .unwrap();
    assert_eq!(page.page, 2);
    assert_eq!(page.data.len(), 3);

    let queries = received_queries(&server).await;
    assert!(queries[0].contains(&("page".to_string(), "2".to_string())));
    assert!(queries[0].contains(&("search".to_string(), "unimed sul".to_string())));
}

#[tokio::test]
async fn test_requests_carry_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/operadoras"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(1, 0, 0, 0)))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).get_operadoras(1, 10, "").await.unwrap();
    assert!(page.data.is_empty());
}

// ============================================================================
// Keyed lookups and statistics
// ============================================================================

#[tokio::test]
async fn test_get_operadora_returns_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/operadoras/12345678000190"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "registro_ans": "123456",
            "cnpj": "12345678000190",
            "razao_social": "Saude Exemplo LTDA",
            "modalidade": "Medicina de Grupo",
            "uf": "RJ",
            "data_cadastro": "2001-05-10"
        })))
        .mount(&server)
        .await;

    let op = client_for(&server)
        .get_operadora("12345678000190")
        .await
        .unwrap();
    assert_eq!(op.key(), Some("12345678000190"));
    assert_eq!(op.razao_social.as_deref(), Some("Saude Exemplo LTDA"));
    assert_eq!(op.data_cadastro.as_deref(), Some("2001-05-10"));
}

#[tokio::test]
async fn test_dot_and_empty_keys_never_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(1, 0, 0, 0)))
        .expect(0)
        .mount(&server)
        .await;
    let client = client_for(&server);

    for key in ["", ".", ".."] {
        let err = client.get_operadora(key).await.unwrap_err();
        assert_eq!(err, ApiError::NotFound { detail: None }, "key {key:?}");

        let err = client.get_operadora_despesas(key).await.unwrap_err();
        assert_eq!(err, ApiError::NotFound { detail: None }, "key {key:?}");
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_operadora_despesas_returns_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/operadoras/123456/despesas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "operadora": {"registro_ans": "123456", "cnpj": null, "razao_social": "X", "uf": "MG"},
            "despesas": [
                {"trimestre": 2, "ano": 2024, "valor_despesas": 200.0, "data_importacao": null},
                {"trimestre": 1, "ano": 2024, "valor_despesas": 100.0, "data_importacao": null}
            ],
            "total_despesas": 300.0,
            "num_trimestres": 2
        })))
        .mount(&server)
        .await;

    let historico = client_for(&server)
        .get_operadora_despesas("123456")
        .await
        .unwrap();
    assert_eq!(historico.num_trimestres, 2);
    assert_eq!(historico.despesas[0].trimestre, 2);
    assert_eq!(
        historico.operadora.and_then(|o| o.key().map(str::to_string)),
        Some("123456".to_string())
    );
}

#[tokio::test]
async fn test_get_estatisticas_returns_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/estatisticas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_despesas": 1000.0,
            "media_despesas": 250.0,
            "total_operadoras": 4,
            "total_registros": 4,
            "top_5_operadoras": [],
            "despesas_por_uf": [{"uf": "SP", "total_despesas": 1000.0, "num_operadoras": 4, "percentual": 100.0}]
        })))
        .mount(&server)
        .await;

    let stats = client_for(&server).get_estatisticas().await.unwrap();
    assert_eq!(stats.total_operadoras, 4);
    assert_eq!(stats.despesas_por_uf[0].uf.as_deref(), Some("SP"));
}

// ============================================================================
// Error normalization
// ============================================================================

#[tokio::test]
async fn test_404_uses_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/operadoras/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "Operadora com CNPJ/Registro ANS 999 não encontrada"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).get_operadora("999").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { detail: Some(_) }));
    assert_eq!(
        err.to_string(),
        "Operadora com CNPJ/Registro ANS 999 não encontrada"
    );
}

#[tokio::test]
async fn test_fixed_status_messages() {
    let err = error_for_status(500, json!({"detail": "boom"})).await;
    assert_eq!(err, ApiError::ServerError);
    assert_eq!(
        err.to_string(),
        "Erro no servidor. Por favor, tente novamente mais tarde."
    );

    let err = error_for_status(503, json!({})).await;
    assert_eq!(err, ApiError::Unavailable);
    assert_eq!(err.to_string(), "Serviço temporariamente indisponível");

    let err = error_for_status(404, json!({})).await;
    assert_eq!(err.to_string(), "Recurso não encontrado");
}

#[tokio::test]
async fn test_other_status_falls_back_to_http_code() {
    let err = error_for_status(429, json!({"message": "slow down"})).await;
    assert_eq!(err, ApiError::Http { status: 429, detail: None });
    assert_eq!(err.to_string(), "Erro HTTP 429");

    let err = error_for_status(400, json!({"detail": "page deve ser >= 1"})).await;
    assert_eq!(err.to_string(), "page deve ser >= 1");
}

#[tokio::test]
async fn test_connection_refused_is_no_connection() {
    // Grab a free port, then close it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ApiClient::new(format!("http://127.0.0.1:{port}"), DEFAULT_TIMEOUT).unwrap();

    let err = client.get_operadoras(1, 10, "").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(
        err.to_string(),
        "Sem conexão com o servidor. Verifique sua internet."
    );
}

#[tokio::test]
async fn test_timeout_is_no_connection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/estatisticas"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), Duration::from_millis(100)).unwrap();
    let err = client.get_estatisticas().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_unusable_base_url_never_sends() {
    let client = ApiClient::new("not a url", DEFAULT_TIMEOUT).unwrap();
    let err = client.get_estatisticas().await.unwrap_err();
    assert!(matches!(err, ApiError::Unknown(Some(_))));
    assert_ne!(err.to_string(), "Erro desconhecido. Tente novamente.");
}

#[tokio::test]
async fn test_undecodable_body_is_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/operadoras"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_operadoras(1, 10, "")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unknown(Some(_))));
}
