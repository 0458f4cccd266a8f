use artigo_rs::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_error_log_keeps_only_errors() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("logs").join("app.log");

    init_logging(&log_file).unwrap();
    // 第二次调用保持已安装的订阅者
    init_logging(&temp_dir.path().join("outro.log")).unwrap();

    tracing::error!("Erro na pesquisa: serviço indisponível");
    tracing::warn!("aviso que não deve ser gravado");
    tracing::info!("informação que não deve ser gravada");

    let content = std::fs::read_to_string(&log_file).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("ERROR"));
    assert!(content.contains("Erro na pesquisa: serviço indisponível"));
    assert!(!content.contains("aviso"));
    assert!(!temp_dir.path().join("outro.log").exists());
}
