//! Invariant checks for [`SyncConfig`].

use std::num::NonZeroU32;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::model::SyncConfig;

pub(crate) fn validate(config: &SyncConfig) -> ConfigResult<()> {
    let scheme = config.service_base_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::invalid(
            "service_base_url",
            "must use http or https",
            Some(config.service_base_url.to_string()),
        ));
    }
    if config.service_base_url.host_str().is_none() {
        return Err(ConfigError::invalid(
            "service_base_url",
            "must include a host",
            Some(config.service_base_url.to_string()),
        ));
    }

    if config.account.trim().is_empty() {
        return Err(ConfigError::invalid("account", "must not be empty", None));
    }
    if config.password.is_empty() {
        return Err(ConfigError::invalid("password", "must not be empty", None));
    }

    non_zero("batch_size", config.batch_size)?;
    non_zero("page_ceiling", config.page_ceiling)?;
    non_zero("retry_limit", config.retry_limit)?;
    if config.request_timeout.is_zero() {
        return Err(ConfigError::invalid(
            "request_timeout",
            "must be greater than zero",
            None,
        ));
    }

    validate_directories(&config.source_directory, &config.destination_directory)
}

pub(crate) fn non_zero(field: &'static str, value: u32) -> ConfigResult<NonZeroU32> {
    NonZeroU32::new(value).ok_or_else(|| {
        ConfigError::invalid(field, "must be greater than zero", Some(value.to_string()))
    })
}

fn validate_directories(source: &Path, destination: &Path) -> ConfigResult<()> {
    if source.as_os_str().is_empty() {
        return Err(ConfigError::invalid(
            "source_directory",
            "must not be empty",
            None,
        ));
    }
    if destination.as_os_str().is_empty() {
        return Err(ConfigError::invalid(
            "destination_directory",
            "must not be empty",
            None,
        ));
    }
    if source == destination {
        return Err(ConfigError::invalid(
            "destination_directory",
            "must differ from source_directory",
            Some(destination.display().to_string()),
        ));
    }
    // A destination nested in the source would be scanned and moved into itself.
    if destination.starts_with(source) {
        return Err(ConfigError::invalid(
            "destination_directory",
            "must not be inside source_directory",
            Some(destination.display().to_string()),
        ));
    }
    Ok(())
}
