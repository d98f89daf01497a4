//! Roster records: administrators, social workers and clients.
//!
//! # Responsibility
//! - Define the persisted record shapes for each roster collection.
//! - Validate form drafts before they become records.
//!
//! # Invariants
//! - Records only come from validated drafts or from storage blobs whose
//!   fields have the expected primitive types.
//! - Validation error display strings are the inline form messages.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static ID_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-3][0-9][0-1][0-9][0-9]{2}\d{7}$").expect("valid id regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid phone regex"));

const MIN_PASSWORD_CHARS: usize = 8;

/// Rehab or NGO administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl Admin {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Social worker who refers clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialWorker {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl SocialWorker {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Client on the program roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: u32,
    pub file_number: String,
    pub client_name: String,
    /// Stored as a number, or `""` when not captured.
    #[serde(with = "blank_age")]
    pub age: Option<u32>,
    pub gender: String,
    pub suburb: String,
    pub address: String,
    pub next_of_kin_name: String,
    pub next_of_kin_phone: String,
    pub assigned_worker: String,
    pub selected_substances: Vec<String>,
}

mod blank_age {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AgeRepr {
        Number(u32),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(age) => age.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        match AgeRepr::deserialize(deserializer)? {
            AgeRepr::Number(age) => Ok(Some(age)),
            AgeRepr::Text(text) if text.is_empty() => Ok(None),
            AgeRepr::Text(text) => Err(D::Error::custom(format!("invalid age `{text}`"))),
        }
    }
}

/// Field-level failure on the social-worker registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationIssue {
    IdNumber,
    Phone,
    Email,
    Password,
}

impl RegistrationIssue {
    /// Form field the issue belongs to.
    pub fn field(self) -> &'static str {
        match self {
            Self::IdNumber => "idNumber",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::IdNumber => "ID Number must start with DDMMYY and be exactly 13 digits",
            Self::Phone => "Phone number must be exactly 10 digits",
            Self::Email => "Enter a valid email address",
            Self::Password => {
                "Password must contain letters, numbers, special characters and be at least 8 characters long"
            }
        }
    }
}

/// Form validation failure. `Display` yields the inline message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    AdminFieldsRequired,
    SocialWorkerFieldsRequired,
    ClientFieldsRequired,
    InvalidEmail,
    NegativeAge,
    Registration(Vec<RegistrationIssue>),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AdminFieldsRequired => {
                f.write_str("First name, surname, email, and password are required.")
            }
            Self::SocialWorkerFieldsRequired => f.write_str("Please fill in all required fields."),
            Self::ClientFieldsRequired => f.write_str(
                "Please fill in all required fields: Name, Age, Gender, Suburb, Address.",
            ),
            Self::InvalidEmail => f.write_str("Enter a valid email address."),
            Self::NegativeAge => f.write_str("Age cannot be negative."),
            Self::Registration(issues) => {
                let messages: Vec<&str> = issues.iter().map(|issue| issue.message()).collect();
                f.write_str(&messages.join("; "))
            }
        }
    }
}

impl Error for ValidationError {}

/// Returns whether `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Returns whether `password` has at least 8 chars including a letter, a
/// digit and a non-alphanumeric character.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
        && password.chars().any(|ch| ch.is_ascii_alphabetic())
        && password.chars().any(|ch| ch.is_ascii_digit())
        && password.chars().any(|ch| !ch.is_ascii_alphanumeric())
}

/// Admin add/edit form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl AdminDraft {
    /// Validates and trims the draft into a record with `id`.
    pub fn into_admin(self, id: u32) -> Result<Admin, ValidationError> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let email = self.email.trim();
        if first_name.is_empty() || last_name.is_empty() || email.is_empty() || self.password.is_empty()
        {
            return Err(ValidationError::AdminFieldsRequired);
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Admin {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password: self.password,
        })
    }
}

/// Social worker add/edit form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialWorkerDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl SocialWorkerDraft {
    pub fn into_social_worker(self, id: u32) -> Result<SocialWorker, ValidationError> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();
        if first_name.is_empty()
            || last_name.is_empty()
            || email.is_empty()
            || phone.is_empty()
            || self.password.is_empty()
        {
            return Err(ValidationError::SocialWorkerFieldsRequired);
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(SocialWorker {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            password: self.password,
        })
    }
}

/// Full social-worker registration form, stricter than the edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialWorkerRegistration {
    pub name: String,
    pub surname: String,
    pub id_number: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl SocialWorkerRegistration {
    /// Returns every failing field, in form order.
    pub fn issues(&self) -> Vec<RegistrationIssue> {
        let mut issues = Vec::new();
        if !ID_NUMBER_RE.is_match(&self.id_number) {
            issues.push(RegistrationIssue::IdNumber);
        }
        if !PHONE_RE.is_match(&self.phone) {
            issues.push(RegistrationIssue::Phone);
        }
        if !is_valid_email(&self.email) {
            issues.push(RegistrationIssue::Email);
        }
        if !is_strong_password(&self.password) {
            issues.push(RegistrationIssue::Password);
        }
        issues
    }

    /// Validates the registration and converts it into a roster draft.
    pub fn into_draft(self) -> Result<SocialWorkerDraft, ValidationError> {
        let issues = self.issues();
        if !issues.is_empty() {
            return Err(ValidationError::Registration(issues));
        }
        Ok(SocialWorkerDraft {
            first_name: self.name,
            last_name: self.surname,
            email: self.email,
            phone: self.phone,
            password: self.password,
        })
    }
}

/// Client add/edit form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDraft {
    pub client_name: String,
    /// `None` when the age field is blank.
    pub age: Option<i64>,
    pub gender: String,
    pub suburb: String,
    pub address: String,
    pub next_of_kin_name: String,
    pub next_of_kin_phone: String,
    pub assigned_worker: String,
    pub selected_substances: Vec<String>,
}

impl ClientDraft {
    pub fn into_client(self, id: u32, file_number: String) -> Result<Client, ValidationError> {
        let client_name = self.client_name.trim();
        let address = self.address.trim();
        let Some(age) = self.age else {
            return Err(ValidationError::ClientFieldsRequired);
        };
        if client_name.is_empty()
            || self.gender.is_empty()
            || self.suburb.is_empty()
            || address.is_empty()
        {
            return Err(ValidationError::ClientFieldsRequired);
        }
        let age = u32::try_from(age).map_err(|_| ValidationError::NegativeAge)?;

        Ok(Client {
            id,
            file_number,
            client_name: client_name.to_string(),
            age: Some(age),
            gender: self.gender,
            suburb: self.suburb,
            address: address.to_string(),
            next_of_kin_name: self.next_of_kin_name.trim().to_string(),
            next_of_kin_phone: self.next_of_kin_phone.trim().to_string(),
            assigned_worker: self.assigned_worker.trim().to_string(),
            selected_substances: self.selected_substances,
        })
    }
}

/// Seed administrators.
pub fn seed_admins() -> Vec<Admin> {
    [
        (1, "Alice", "Smith", "alice@example.com", "password123"),
        (2, "Bob", "Johnson", "bob@example.com", "secret456"),
        (3, "Carol", "Williams", "carol@example.com", "hunter2"),
    ]
    .into_iter()
    .map(|(id, first, last, email, password)| Admin {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
    .collect()
}

/// Seed social workers.
pub fn seed_social_workers() -> Vec<SocialWorker> {
    [
        (1, "Alice", "Smith", "alice.smith@example.com", "0821234567", "passAlice1"),
        (2, "Bob", "Johnson", "bob.johnson@example.com", "0837654321", "bobSecret!"),
        (3, "Carol", "Williams", "carol.williams@example.com", "0845551234", "carolPwd123"),
    ]
    .into_iter()
    .map(|(id, first, last, email, phone, password)| SocialWorker {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        password: password.to_string(),
    })
    .collect()
}

/// Seed clients.
pub fn seed_clients() -> Vec<Client> {
    let client = |id: u32,
                  name: &str,
                  age: u32,
                  gender: &str,
                  suburb: &str,
                  address: &str,
                  kin: (&str, &str),
                  worker: &str,
                  substances: &[&str]| Client {
        id,
        file_number: format!("FILE-{}", 1000 + id),
        client_name: name.to_string(),
        age: Some(age),
        gender: gender.to_string(),
        suburb: suburb.to_string(),
        address: address.to_string(),
        next_of_kin_name: kin.0.to_string(),
        next_of_kin_phone: kin.1.to_string(),
        assigned_worker: worker.to_string(),
        selected_substances: substances.iter().map(|name| name.to_string()).collect(),
    };

    vec![
        client(
            1,
            "John Doe",
            30,
            "male",
            "Armadale",
            "123 Main St, Armadale",
            ("Jane Doe", "0821234567"),
            "Worker A",
            &["alcohol"],
        ),
        client(
            2,
            "Mary Smith",
            25,
            "female",
            "Chiawelo",
            "45 River Rd, Chiawelo",
            ("Peter Smith", "0837654321"),
            "Worker B",
            &["dagga", "inhalants"],
        ),
        client(
            3,
            "Alice Johnson",
            40,
            "female",
            "Zondi",
            "78 Elm St, Zondi",
            ("Bob Johnson", "0845551234"),
            "Worker C",
            &[],
        ),
    ]
}
