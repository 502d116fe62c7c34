//! Field validation for proxy rule drafts.
//!
//! Every check is a pure function of its arguments: the list of existing
//! records used for uniqueness hints is passed in as a snapshot, never read
//! from shared state. The rules mirror the controller's own validation only
//! loosely (IPv6 literals get a shallow check) because the backend remains
//! authoritative; these exist to give feedback before a request is sent.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use mortar_portal_client::{ProxyRule, MAX_PORT, MIN_PORT};
use regex::Regex;
use serde::Serialize;

const MAX_NAME_LENGTH: usize = 253;
const MAX_DOMAIN_LENGTH: usize = 253;

// `[0-9]` rather than `\d`: the latter matches any Unicode digit.
const K8S_NAME_PATTERN: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";
const DNS_NAME_PATTERN: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$";
const IPV4_PATTERN: &str = r"^[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+$";

static K8S_NAME: LazyLock<Regex> = LazyLock::new(|| compile(K8S_NAME_PATTERN));
static DNS_NAME: LazyLock<Regex> = LazyLock::new(|| compile(DNS_NAME_PATTERN));
static IPV4: LazyLock<Regex> = LazyLock::new(|| compile(IPV4_PATTERN));

// 模式均为常量
#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

// ============ 错误类型 ============

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValidationErrorKind {
    EmptyValue,
    TooLong,
    BadFormat,
    NotANumber,
    OutOfRange,
    DuplicateName,
    DuplicateDomain,
}

/// A failed check together with the message shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn prefixed(self, prefix: &str) -> Self {
        Self {
            kind: self.kind,
            message: format!("{prefix}{}", self.message),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

/// Form fields that carry validation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    Name,
    Domain,
    Destinations,
    Port,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Domain, Field::Destinations, Field::Port];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Domain => "Domain",
            Field::Destinations => "Destinations",
            Field::Port => "Port",
        }
    }
}

/// Per-field errors of a whole draft, in field order.
pub type FieldErrors = BTreeMap<Field, ValidationError>;

/// Whether an aggregate result contains any error.
pub fn has_validation_errors(errors: &FieldErrors) -> bool {
    !errors.is_empty()
}

// ============ 单字段校验 ============

pub fn validate_name(name: &str) -> ValidationResult {
    use ValidationErrorKind::{BadFormat, EmptyValue, TooLong};

    if name.trim().is_empty() {
        return Err(ValidationError::new(EmptyValue, "Name is required"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::new(
            TooLong,
            format!("Name must not exceed {MAX_NAME_LENGTH} characters"),
        ));
    }
    if !K8S_NAME.is_match(name) {
        return Err(ValidationError::new(
            BadFormat,
            "Name must consist of lowercase alphanumeric characters or '-', and must start and end with an alphanumeric character",
        ));
    }
    Ok(())
}

/// Accepts a DNS name or a `*.`-prefixed wildcard over one.
pub fn validate_domain(domain: &str) -> ValidationResult {
    use ValidationErrorKind::{BadFormat, EmptyValue, TooLong};

    if domain.trim().is_empty() {
        return Err(ValidationError::new(EmptyValue, "Domain is required"));
    }
    if domain.chars().count() > MAX_DOMAIN_LENGTH {
        return Err(ValidationError::new(
            TooLong,
            format!("Domain must not exceed {MAX_DOMAIN_LENGTH} characters"),
        ));
    }

    let host = match domain.strip_prefix("*.") {
        Some("") => {
            return Err(ValidationError::new(
                BadFormat,
                "Domain must include a DNS name after the wildcard '*.'",
            ));
        }
        Some(rest) => rest,
        None => domain,
    };

    dns_name_shape(host, "Domain")?;

    if !DNS_NAME.is_match(&host.to_lowercase()) {
        return Err(ValidationError::new(
            BadFormat,
            "Domain must be a valid DNS name (lowercase alphanumeric characters, '-', and '.' only)",
        ));
    }
    Ok(())
}

/// Dot placement rules shared by domains and DNS-name destinations.
fn dns_name_shape(value: &str, subject: &str) -> ValidationResult {
    if value.starts_with('.') || value.ends_with('.') {
        return Err(ValidationError::new(
            ValidationErrorKind::BadFormat,
            format!("{subject} must not start or end with a dot"),
        ));
    }
    if value.contains("..") {
        return Err(ValidationError::new(
            ValidationErrorKind::BadFormat,
            format!("{subject} must not contain consecutive dots"),
        ));
    }
    Ok(())
}

/// Accepts an IPv4 literal, something with at least two colons (IPv6 is left
/// to the backend), or a DNS name, tried in that order.
pub fn validate_destination(value: &str, allow_empty: bool) -> ValidationResult {
    use ValidationErrorKind::{BadFormat, EmptyValue};

    if value.trim().is_empty() {
        return if allow_empty {
            Ok(())
        } else {
            Err(ValidationError::new(EmptyValue, "Destination is required"))
        };
    }

    if IPV4.is_match(value) {
        let octets_ok = value
            .split('.')
            .all(|octet| octet.parse::<u32>().is_ok_and(|n| n <= 255));
        return if octets_ok {
            Ok(())
        } else {
            Err(ValidationError::new(
                BadFormat,
                "Destination appears to be an IPv4 address but is invalid (octets must be 0-255)",
            ))
        };
    }

    if value.contains(':') {
        return if value.matches(':').count() >= 2 {
            Ok(())
        } else {
            Err(ValidationError::new(
                BadFormat,
                "Destination appears to be an IPv6 address but is invalid",
            ))
        };
    }

    dns_name_shape(value, "Destination")?;

    if !DNS_NAME.is_match(&value.to_lowercase()) {
        return Err(ValidationError::new(
            BadFormat,
            "Destination must be a valid IP address or DNS name",
        ));
    }
    Ok(())
}

/// Validates every entry, stopping at the first failure (numbered from 1).
pub fn validate_destinations(destinations: &[String]) -> ValidationResult {
    if destinations.is_empty() {
        return Err(ValidationError::new(
            ValidationErrorKind::EmptyValue,
            "At least one destination is required",
        ));
    }
    for (index, destination) in destinations.iter().enumerate() {
        validate_destination(destination, false)
            .map_err(|e| e.prefixed(&format!("Destination {}: ", index + 1)))?;
    }
    Ok(())
}

/// Port is optional: blank input passes.
///
/// Otherwise the value must be ASCII digits, optionally preceded by `-`
/// (which then fails the range check). Signs like `+` and embedded or
/// surrounding whitespace are not a number.
pub fn validate_port(value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Ok(());
    }

    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::new(
            ValidationErrorKind::NotANumber,
            "Port must be a number",
        ));
    }

    // 超出 i64 的数字串同样视为越界
    match value.parse::<i64>() {
        Ok(port) if (i64::from(MIN_PORT)..=i64::from(MAX_PORT)).contains(&port) => Ok(()),
        _ => Err(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            format!("Port must be between {MIN_PORT} and {MAX_PORT}"),
        )),
    }
}

// ============ 唯一性校验 ============

/// The record being edited never conflicts with itself.
fn is_exempt(rule: &ProxyRule, current_name: Option<&str>) -> bool {
    current_name.is_some_and(|current| !current.is_empty() && rule.name() == current)
}

/// Passes when `name` is empty or no snapshot of existing records is available.
pub fn validate_name_unique(
    name: &str,
    existing: Option<&[ProxyRule]>,
    current_name: Option<&str>,
) -> ValidationResult {
    let Some(existing) = existing else {
        return Ok(());
    };
    if name.is_empty() {
        return Ok(());
    }

    let duplicate = existing
        .iter()
        .filter(|rule| !is_exempt(rule, current_name))
        .any(|rule| rule.name() == name);

    if duplicate {
        return Err(ValidationError::new(
            ValidationErrorKind::DuplicateName,
            format!("Proxy rule with name '{name}' already exists"),
        ));
    }
    Ok(())
}

/// Passes when `domain` is empty or no snapshot of existing records is available.
pub fn validate_domain_unique(
    domain: &str,
    existing: Option<&[ProxyRule]>,
    current_name: Option<&str>,
) -> ValidationResult {
    let Some(existing) = existing else {
        return Ok(());
    };
    if domain.is_empty() {
        return Ok(());
    }

    let duplicate = existing
        .iter()
        .filter(|rule| !is_exempt(rule, current_name))
        .find(|rule| rule.domain() == domain);

    if let Some(other) = duplicate {
        return Err(ValidationError::new(
            ValidationErrorKind::DuplicateDomain,
            format!(
                "Proxy rule with domain '{domain}' already exists (used by rule '{}')",
                other.name()
            ),
        ));
    }
    Ok(())
}

// ============ 整表校验 ============

/// Raw field values of a draft as typed by the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProxyRuleInput<'a> {
    pub name: &'a str,
    pub domain: &'a str,
    pub destinations: &'a [String],
    /// Legacy single-value form, consulted only when `destinations` is empty.
    pub destination: Option<&'a str>,
    pub port: &'a str,
}

/// Runs every field check and collects the failures.
///
/// Uniqueness is checked only after the syntax check of the same field passed
/// and only when `existing` is available. With `current_name` set (edit mode)
/// the name is immutable, so only its syntax is checked.
pub fn validate_proxy_rule_form(
    input: &ProxyRuleInput<'_>,
    existing: Option<&[ProxyRule]>,
    current_name: Option<&str>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let name_result = validate_name(input.name).and_then(|()| {
        if current_name.is_none() && existing.is_some() {
            validate_name_unique(input.name, existing, current_name)
        } else {
            Ok(())
        }
    });
    if let Err(e) = name_result {
        errors.insert(Field::Name, e);
    }

    let domain_result = validate_domain(input.domain).and_then(|()| {
        if existing.is_some() {
            validate_domain_unique(input.domain, existing, current_name)
        } else {
            Ok(())
        }
    });
    if let Err(e) = domain_result {
        errors.insert(Field::Domain, e);
    }

    let destination_result = if !input.destinations.is_empty() {
        validate_destinations(input.destinations)
    } else {
        match input.destination {
            Some(single) if !single.trim().is_empty() => validate_destination(single, false),
            _ => Err(ValidationError::new(
                ValidationErrorKind::EmptyValue,
                "At least one destination is required",
            )),
        }
    };
    if let Err(e) = destination_result {
        errors.insert(Field::Destinations, e);
    }

    if let Err(e) = validate_port(input.port) {
        errors.insert(Field::Port, e);
    }

    errors
}
