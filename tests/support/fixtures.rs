//! Test fixtures and constants.

/// File name of the controller public key inside a test directory.
pub const KEY_FILE: &str = "controller.pem";

pub const NAMESPACE: &str = "team-a";

pub const SECRET_NAME: &str = "db";

/// Plain values with one multi-line block.
pub const SAMPLE_VALUES: &str = "DATABASE_URL=postgres://localhost/app\ntls.crt=`-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----`\nAPI_KEY=sk-test-12345";

/// Values that fail to parse; the bad line has index 1.
pub const MALFORMED_VALUES: &str = "ok=1\nno separator";

/// Value the poison encryptor refuses to seal.
pub const POISON: &str = "poison";

pub const OWNER_ANNOTATION: &str = "owner";
