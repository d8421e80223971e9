//! Rollout targeting: what fraction of users (or which single user)
//! a migration moves.

use crate::error::{RelayError, Result};

/// Options threaded into the Migrator by the command layer.
///
/// `user` scopes the migration to one account instead of a percent
/// bucket; `update_migrations` repackages the working directory and
/// attaches it to the request.
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    pub user: Option<String>,
    pub update_migrations: bool,
}

/// Lenient percent normalization.
///
/// Accepts the forms operators actually type (`15`, `15%`, ` 100% `);
/// anything after the leading digits is ignored. `None` means the
/// input had no leading integer at all — that still goes on the wire
/// (as a null percent) for the platform to reject, since range
/// validation is the platform's job, not ours.
pub fn parse_percent(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits.bytes().take_while(|b| b.is_ascii_digit()).count();
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// A user-scoped migration only makes sense for the whole bucket.
/// Checked before any remote call is made.
pub fn check_user_percent(percent: Option<i64>, user: Option<&str>) -> Result<()> {
    if user.is_some() && percent != Some(100) {
        return Err(RelayError::PercentAndUser);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_suffixed_forms_parse() {
        assert_eq!(parse_percent("15"), Some(15));
        assert_eq!(parse_percent("15%"), Some(15));
        assert_eq!(parse_percent(" 100% "), Some(100));
        assert_eq!(parse_percent("0"), Some(0));
    }

    #[test]
    fn trailing_junk_is_ignored() {
        assert_eq!(parse_percent("42abc"), Some(42));
    }

    #[test]
    fn out_of_range_values_pass_through() {
        // Range enforcement belongs to the platform.
        assert_eq!(parse_percent("150%"), Some(150));
        assert_eq!(parse_percent("-5"), Some(-5));
    }

    #[test]
    fn non_numeric_is_none() {
        assert_eq!(parse_percent("abc"), None);
        assert_eq!(parse_percent(""), None);
        assert_eq!(parse_percent("%"), None);
    }

    #[test]
    fn user_requires_full_percent() {
        assert!(check_user_percent(Some(100), Some("a@b.com")).is_ok());
        assert!(matches!(
            check_user_percent(Some(15), Some("a@b.com")),
            Err(RelayError::PercentAndUser)
        ));
        assert!(matches!(
            check_user_percent(None, Some("a@b.com")),
            Err(RelayError::PercentAndUser)
        ));
    }

    #[test]
    fn percent_alone_is_always_fine() {
        assert!(check_user_percent(Some(15), None).is_ok());
        assert!(check_user_percent(None, None).is_ok());
    }
}
