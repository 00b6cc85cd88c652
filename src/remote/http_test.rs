use crate::config::ConnectionSettings;
use crate::errors::RemoteError;
use crate::remote::http::normalize_server_url;
use crate::remote::sign;
use crate::remote::HttpRemoteSource;
use crate::Error;

#[test]
fn test_normalize_server_url() {
    let cases = vec![
        ("localhost:8080", "http://localhost:8080"),
        ("http://localhost:8080", "http://localhost:8080"),
        ("https://config.example.com", "https://config.example.com"),
        ("http://localhost:8080/", "http://localhost:8080"),
    ];

    for (server, want) in cases {
        assert_eq!(want, normalize_server_url(server));
    }
}

#[test]
fn test_new_rejects_empty_app_id() {
    let result = HttpRemoteSource::new("", &ConnectionSettings::default());

    assert!(matches!(
        result.unwrap_err(),
        Error::Remote(RemoteError::EmptyAppId)
    ));
}

#[test]
fn test_new_rejects_unparsable_server_url() {
    let settings = ConnectionSettings {
        server_url: "http://[invalid".to_string(),
        ..Default::default()
    };

    assert!(HttpRemoteSource::new("myApp", &settings).is_err());
}

#[test]
fn test_signature_is_stable() {
    let first = sign::signature("1577808000000", "/configs/myApp/default/application", "secret");
    let second = sign::signature("1577808000000", "/configs/myApp/default/application", "secret");

    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_signature_covers_all_inputs() {
    let base = sign::signature("1", "/configs/a", "secret");

    assert_ne!(base, sign::signature("2", "/configs/a", "secret"));
    assert_ne!(base, sign::signature("1", "/configs/b", "secret"));
    assert_ne!(base, sign::signature("1", "/configs/a", "other"));
}

#[test]
fn test_auth_headers_shape() {
    let headers = sign::auth_headers("/notifications?appId=myApp", "myApp", "secret");

    assert_eq!("Authorization", headers[0].0);
    assert!(headers[0].1.starts_with("myApp:"));
    assert_eq!("Timestamp", headers[1].0);
    assert!(headers[1].1.chars().all(|c| c.is_ascii_digit()));
}
