//! Contact details for an order.

use crate::domain::{
    checkout::{data::CheckoutRequest, errors::ValidationError},
    users::records::ProfileRecord,
};

/// Contact details recorded on an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub email: String,
    pub full_name: String,
    pub address: String,
}

/// Pick the trimmed explicit value, else the trimmed stored value.
///
/// Blank strings count as absent at both tiers.
#[must_use]
pub fn resolve_field(input: Option<&str>, stored: Option<&str>) -> Option<String> {
    [input, stored]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Resolve every contact field against the caller's input and profile.
///
/// # Errors
///
/// Returns the `Missing*` validation error for the first field that has no
/// value at either tier.
pub fn resolve_contact(
    request: &CheckoutRequest,
    profile: Option<&ProfileRecord>,
) -> Result<Contact, ValidationError> {
    let email = resolve_field(
        request.email.as_deref(),
        profile.map(|profile| profile.email.as_str()),
    )
    .ok_or(ValidationError::MissingEmail)?;

    let full_name = resolve_field(
        request.full_name.as_deref(),
        profile.and_then(|profile| profile.full_name.as_deref()),
    )
    .ok_or(ValidationError::MissingFullName)?;

    let address = resolve_field(
        request.address.as_deref(),
        profile.and_then(|profile| profile.address.as_deref()),
    )
    .ok_or(ValidationError::MissingAddress)?;

    Ok(Contact {
        email,
        full_name,
        address,
    })
}
