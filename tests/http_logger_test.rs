//! Tests for http_logger module

use prompt_forge::http_logger::{is_sensitive_header, mask_token, truncate_utf8_safe};

#[test]
fn test_truncate_utf8_safe_ascii() {
    let s = "Hello, World!";
    assert_eq!(truncate_utf8_safe(s, 100), s);
    assert!(truncate_utf8_safe(s, 5).starts_with("Hello"));
}

#[test]
fn test_truncate_utf8_safe_unicode() {
    let s = "你好世界Hello";
    // 12 bytes of CJK plus 5 ASCII; byte 10 is inside a character
    let truncated = truncate_utf8_safe(s, 10);
    assert!(truncated.starts_with("你好世"));
    assert!(truncated.contains("[truncated, total 17 bytes]"));
}

#[test]
fn test_mask_token_bearer() {
    assert_eq!(mask_token("Bearer abcdefghijklmnop"), "Bearer abcd...mnop");
    assert_eq!(mask_token("Bearer short"), "Bearer ****");
}

#[test]
fn test_mask_token_generic() {
    assert_eq!(mask_token("abcdefghijklmnop"), "abcd...mnop");
    assert_eq!(mask_token("short"), "****");
}

#[test]
fn test_is_sensitive_header() {
    assert!(is_sensitive_header("x-goog-api-key"));
    assert!(is_sensitive_header("X-Goog-Api-Key"));
    assert!(is_sensitive_header("Authorization"));
    assert!(is_sensitive_header("set-cookie"));
    assert!(!is_sensitive_header("Content-Type"));
    assert!(!is_sensitive_header("x-request-id"));
}
