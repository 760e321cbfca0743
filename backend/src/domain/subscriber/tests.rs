//! Tests for subscriber value types.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn bob() -> Subscriber {
    Subscriber::register(
        Username::new("bob").expect("username"),
        Secret::new("pw").expect("secret"),
        PhoneNumber::normalise("(555) 123-4567").expect("phone"),
        Carrier::Verizon,
    )
}

#[rstest]
#[case::empty("", ValidationError::EmptyUsername)]
#[case::leading(" bob", ValidationError::UsernameWhitespace)]
#[case::trailing("bob\n", ValidationError::UsernameWhitespace)]
fn username_rejects_invalid_values(#[case] raw: &str, #[case] expected: ValidationError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[rstest]
#[case::formatted("(555) 123-4567", "5551234567")]
#[case::dotted("555.123.4567", "5551234567")]
#[case::plain("5551234567", "5551234567")]
fn phone_normalisation_strips_non_digits(#[case] raw: &str, #[case] expected: &str) {
    let phone = PhoneNumber::normalise(raw).expect("valid phone");
    assert_eq!(phone.as_ref(), expected);
}

#[rstest]
#[case::short("555-1234", 7)]
#[case::country_code("+1 (555) 123-4567", 11)]
#[case::letters("call me", 0)]
fn phone_normalisation_requires_ten_digits(#[case] raw: &str, #[case] found: usize) {
    assert_eq!(
        PhoneNumber::normalise(raw),
        Err(ValidationError::InvalidPhoneNumber {
            expected: PHONE_DIGITS,
            found,
        })
    );
}

#[rstest]
#[case("att", Carrier::Att, "txt.att.net")]
#[case("at&t", Carrier::AtAndT, "txt.att.net")]
#[case("verizon", Carrier::Verizon, "vtext.com")]
#[case("boost", Carrier::Boost, "myboostmobile.com")]
#[case("virgin", Carrier::Virgin, "vmobl.com")]
fn carrier_parses_supported_values(
    #[case] raw: &str,
    #[case] expected: Carrier,
    #[case] domain: &str,
) {
    let carrier: Carrier = raw.parse().expect("supported carrier");
    assert_eq!(carrier, expected);
    assert_eq!(carrier.as_str(), raw);
    assert_eq!(carrier.gateway_domain(), domain);
}

#[rstest]
#[case::capitalised("Verizon")]
#[case::unknown("tmobile")]
#[case::empty("")]
fn carrier_rejects_unsupported_values(#[case] raw: &str) {
    let result: Result<Carrier, _> = raw.parse();
    assert_eq!(
        result,
        Err(ValidationError::UnsupportedCarrier {
            value: raw.to_owned(),
        })
    );
}

#[rstest]
fn carrier_serde_matches_stored_value() {
    let json = serde_json::to_string(&Carrier::AtAndT).expect("serialise");
    assert_eq!(json, "\"at&t\"");
}

#[rstest]
fn secret_debug_is_redacted() {
    let secret = Secret::new("hunter2").expect("secret");
    assert_eq!(format!("{secret:?}"), "Secret(***)");
    assert_eq!(secret.expose(), "hunter2");
}

#[rstest]
fn secret_clones_compare_by_content() {
    let secret = Secret::new("hunter2").expect("secret");
    let copy = secret.clone();
    drop(secret);

    assert_eq!(copy.expose(), "hunter2");
    assert_eq!(copy, Secret::new("hunter2").expect("secret"));
    assert_ne!(copy, Secret::new("hunter3").expect("secret"));
}

#[rstest]
fn secret_rejects_empty_value() {
    assert_eq!(Secret::new(""), Err(ValidationError::EmptySecret));
}

#[rstest]
fn registered_subscriber_starts_without_tickers(bob: Subscriber) {
    assert!(bob.tickers().is_empty());
    assert_eq!(bob.contact().phone.as_ref(), "5551234567");
    assert_eq!(bob.contact().sms_address(), "5551234567@vtext.com");
}

#[rstest]
fn follow_is_set_insert(mut bob: Subscriber) {
    let aapl = TickerSymbol::normalise("aapl").expect("ticker");

    assert!(bob.follow(aapl.clone()));
    assert!(!bob.follow(aapl));
    assert_eq!(bob.tickers().len(), 1);
}
