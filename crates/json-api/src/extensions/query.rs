//! Optional query parameter parsing.

use std::{fmt::Display, str::FromStr};

use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait QueryParamExt {
    /// Parse a trimmed, non-blank value. Blank or absent yields `None`.
    fn parse_or_400<T>(self, name: &str) -> Result<Option<T>, StatusError>
    where
        T: FromStr,
        T::Err: Display;
}

impl QueryParamExt for QueryParam<String, false> {
    fn parse_or_400<T>(self, name: &str) -> Result<Option<T>, StatusError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.into_inner()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(|value| value.parse::<T>())
            .transpose()
            .or_400(&format!("could not parse \"{name}\" query parameter"))
    }
}
