//! Constants for match validation.

/// DNS label maximum length in bytes.
pub const MAX_DNS_LABEL_LENGTH: usize = 63;

/// DNS name maximum length in bytes.
pub const MAX_DNS_NAME_LENGTH: usize = 255;

/// Scheme prefix prepended to bare-domain and `www.` matches when building
/// a usable URL.
pub const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Maximum characters in a hashtag, not counting the leading `#`.
pub const MAX_HASHTAG_LENGTH: usize = 139;

/// Minimum digits for a phone number candidate.
pub const MIN_PHONE_DIGITS: usize = 7;

/// Maximum digits for a phone number candidate (ITU-T E.164).
pub const MAX_PHONE_DIGITS: usize = 15;

/// The literal prefix recognized in front of email addresses.
pub const MAILTO_PREFIX: &str = "mailto:";
