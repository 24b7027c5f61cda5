use super::*;

#[test]
fn test_command_exists() {
    #[cfg(unix)]
    {
        assert!(WebDriverManager::command_exists("ls"));
        assert!(!WebDriverManager::command_exists("nonexistent_command_12345"));
    }
}

#[test]
fn test_find_free_port() {
    let port = WebDriverManager::find_free_port_for_browser(&BrowserType::Chrome).unwrap();
    assert!(port > 0);
    assert!(!WebDriverManager::is_port_in_use(port));
}

#[test]
fn test_is_port_in_use() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    assert!(WebDriverManager::is_port_in_use(port));
}

#[tokio::test]
async fn test_is_driver_running_without_driver() {
    assert!(!WebDriverManager::is_driver_running("http://localhost:65432").await);
    assert!(!WebDriverManager::verify_driver_working("http://localhost:65432").await);
}

#[test]
fn test_stop_all_empty() {
    let manager = WebDriverManager::new();
    // Should not panic even with no processes
    manager.stop_all();
}
