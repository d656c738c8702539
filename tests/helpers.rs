use langbeacon::model::{RectF, ScreenPoint, ScreenRect};
use langbeacon::platform::LayoutId;
use langbeacon::{clamp, LanguageCode};

#[test]
fn clamp_keeps_inner_value() {
    assert_eq!(clamp(10.0, 0.0, 20.0), 10.0);
}

#[test]
fn clamp_limits_low_and_high() {
    assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
    assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
}

#[test]
fn language_code_from_locale_name() {
    assert_eq!(LanguageCode::from_locale_name("en-US").as_str(), "EN");
    assert_eq!(LanguageCode::from_locale_name("ru-RU").as_str(), "RU");
    assert_eq!(LanguageCode::from_locale_name("uk").as_str(), "UK");
}

#[test]
fn language_code_from_empty_locale_is_placeholder() {
    assert_eq!(LanguageCode::from_locale_name("").as_str(), "--");
    assert_eq!(LanguageCode::from_locale_name("   ").as_str(), "--");
}

#[test]
fn language_code_hex_fallback_is_padded() {
    assert_eq!(LanguageCode::hex_fallback(0x0409).as_str(), "0x0409");
    assert_eq!(LanguageCode::hex_fallback(0x7F).as_str(), "0x007F");
    assert_eq!(LanguageCode::hex_fallback(0xABCD).as_str(), "0xABCD");
}

#[test]
fn language_code_display_matches_text() {
    let code = LanguageCode::from_display("DE");
    assert_eq!(code.to_string(), "DE");
    assert_eq!(LanguageCode::from_display("").to_string(), "--");
}

#[test]
fn layout_id_low_word_is_lcid() {
    assert_eq!(LayoutId(0x0419_0419).lcid(), 0x0419);
    assert_eq!(LayoutId(0xF002_0409).lcid(), 0x0409);
    assert!(LayoutId::NONE.is_none());
    assert!(!LayoutId(0x0409_0409).is_none());
}

#[test]
fn screen_rect_from_origin_size() {
    let rect = ScreenRect::from_origin_size(10, 20, 30, 40);
    assert_eq!(rect, ScreenRect::new(10, 20, 40, 60));
    assert_eq!(rect.width(), 30);
    assert_eq!(rect.height(), 40);
    assert_eq!(rect.top_left(), ScreenPoint::new(10, 20));
}

#[test]
fn screen_rect_inflate_and_contains() {
    let rect = ScreenRect::new(100, 100, 200, 200).inflate(5);
    assert_eq!(rect, ScreenRect::new(95, 95, 205, 205));
    assert!(rect.contains(ScreenPoint::new(95, 205)));
    assert!(!rect.contains(ScreenPoint::new(94, 150)));
}

#[test]
fn rect_f_bottom_left_rounds() {
    let rect = RectF::new(10.6, 20.2, 1.0, 15.5);
    assert_eq!(rect.bottom_left(), ScreenPoint::new(11, 36));
}
