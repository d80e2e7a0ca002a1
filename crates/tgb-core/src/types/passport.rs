//! Telegram Passport payloads. Decryption of the element data is left to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::decode::{nullable_vec, unix_time};

use super::FileFields;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportData {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub data: Vec<EncryptedPassportElement>,
    pub credentials: EncryptedCredentials,
}

/// Encrypted JPEG uploaded to Telegram Passport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportFile {
    #[serde(flatten)]
    pub file: FileFields,
    pub file_date: i64,
}

impl PassportFile {
    pub fn file_time(&self) -> Option<DateTime<Utc>> {
        unix_time(self.file_date)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncryptedPassportElementType {
    PersonalDetails,
    Passport,
    DriverLicense,
    IdentityCard,
    InternalPassport,
    Address,
    UtilityBill,
    BankStatement,
    RentalAgreement,
    PassportRegistration,
    TemporaryRegistration,
    PhoneNumber,
    Email,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPassportElement {
    #[serde(rename = "type")]
    pub kind: EncryptedPassportElementType,
    /// Base64, encrypted with the credentials secret.
    pub data: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub files: Vec<PassportFile>,
    pub front_side: Option<PassportFile>,
    pub reverse_side: Option<PassportFile>,
    pub selfie: Option<PassportFile>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub translation: Vec<PassportFile>,
    pub hash: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedCredentials {
    pub data: String,
    pub hash: String,
    /// Encrypted with the bot's public RSA key.
    pub secret: String,
}

/// Reason an element must be resubmitted, keyed by the wire `source` field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PassportElementError {
    Data {
        #[serde(rename = "type")]
        kind: EncryptedPassportElementType,
        field_name: String,
        data_hash: String,
        message: String,
    },
    FrontSide {
        #[serde(rename = "type")]
        kind: EncryptedPassportElementType,
        file_hash: String,
        message: String,
    },
    ReverseSide {
        #[serde(rename = "type")]
        kind: EncryptedPassportElementType,
        file_hash: String,
        message: String,
    },
    Selfie {
        #[serde(rename = "type")]
        kind: EncryptedPassportElementType,
        file_hash: String,
        message: String,
    },
    File {
        #[serde(rename = "type")]
        kind: EncryptedPassportElementType,
        file_hash: String,
        message: String,
    },
    Files {
        #[serde(rename = "type")]
        kind: EncryptedPassportElementType,
        file_hashes: Vec<String>,
        message: String,
    },
    TranslationFile {
        #[serde(rename = "type")]
        kind: EncryptedPassportElementType,
        file_hash: String,
        message: String,
    },
    TranslationFiles {
        #[serde(rename = "type")]
        kind: EncryptedPassportElementType,
        file_hashes: Vec<String>,
        message: String,
    },
    Unspecified {
        #[serde(rename = "type")]
        kind: EncryptedPassportElementType,
        element_hash: String,
        message: String,
    },
}

impl PassportElementError {
    pub fn element_type(&self) -> EncryptedPassportElementType {
        match self {
            PassportElementError::Data { kind, .. }
            | PassportElementError::FrontSide { kind, .. }
            | PassportElementError::ReverseSide { kind, .. }
            | PassportElementError::Selfie { kind, .. }
            | PassportElementError::File { kind, .. }
            | PassportElementError::Files { kind, .. }
            | PassportElementError::TranslationFile { kind, .. }
            | PassportElementError::TranslationFiles { kind, .. }
            | PassportElementError::Unspecified { kind, .. } => *kind,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PassportElementError::Data { message, .. }
            | PassportElementError::FrontSide { message, .. }
            | PassportElementError::ReverseSide { message, .. }
            | PassportElementError::Selfie { message, .. }
            | PassportElementError::File { message, .. }
            | PassportElementError::Files { message, .. }
            | PassportElementError::TranslationFile { message, .. }
            | PassportElementError::TranslationFiles { message, .. }
            | PassportElementError::Unspecified { message, .. } => message,
        }
    }
}
