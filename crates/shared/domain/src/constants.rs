//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement (in characters)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that satisfy the "special character" password rule
pub const PASSWORD_SPECIAL_CHARACTERS: &str = "!@#$%^&*()-_=+[]{};:'\",.<>/?\\|`~";

/// Maximum stored email length (matches the storage column width)
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Message reported for every password policy violation, whichever rule failed
pub const PASSWORD_POLICY_MESSAGE: &str =
    "password must contain at least 8 characters, a digit, a letter, and a special character.";

/// Message reported when an email address is malformed
pub const EMAIL_FORMAT_MESSAGE: &str = "email address is not in a valid format.";

// =============================================================================
// Authentication
// =============================================================================

/// Issued token lifetime in hours
pub const TOKEN_LIFETIME_HOURS: i64 = 1;

/// Minimum recommended JWT secret length
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
