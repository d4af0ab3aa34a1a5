use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Client kind: natural person or company.
///
/// Derived from the creation payload, never supplied directly, and immutable
/// once the client exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientType {
    Person,
    Company,
}

impl ClientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Person => "PERSON",
            ClientType::Company => "COMPANY",
        }
    }
}

impl std::str::FromStr for ClientType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PERSON" => Ok(ClientType::Person),
            "COMPANY" => Ok(ClientType::Company),
            other => Err(format!("unknown client type: {other}")),
        }
    }
}

/// A persisted client record.
///
/// Invariant: exactly one of `birthdate` / `company_identifier` is set,
/// matching `client_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub client_type: ClientType,
    pub email: String,
    pub phone: String,
    pub name: String,
    pub birthdate: Option<NaiveDate>,
    pub company_identifier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A client that passed the registration rules but has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    pub client_type: ClientType,
    pub email: String,
    pub phone: String,
    pub name: String,
    pub birthdate: Option<NaiveDate>,
    pub company_identifier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewClient {
    /// Apply the person/company exclusivity rules to a creation payload.
    ///
    /// A non-blank `company_identifier` makes the client a company. The field
    /// that does not apply to the derived type is forced to `None`, whatever
    /// the caller supplied.
    pub fn register(
        email: String,
        phone: String,
        name: String,
        birthdate: Option<NaiveDate>,
        company_identifier: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let is_company = company_identifier
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty());

        if is_company && birthdate.is_some() {
            return Err(DomainError::bad_request(
                "Companies must not include a birthdate.",
            ));
        }
        if !is_company && birthdate.is_none() {
            return Err(DomainError::bad_request("Persons must include a birthdate."));
        }

        Ok(Self {
            client_type: if is_company {
                ClientType::Company
            } else {
                ClientType::Person
            },
            email,
            phone,
            name,
            birthdate: if is_company { None } else { birthdate },
            company_identifier: if is_company { company_identifier } else { None },
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
    }

    fn birthdate() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 5, 14).unwrap()
    }

    #[test]
    fn person_requires_birthdate() {
        let err = NewClient::register(
            "jane.doe@example.com".into(),
            "+15551234567".into(),
            "Jane Doe".into(),
            None,
            None,
            now(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::BadRequest("Persons must include a birthdate.".into())
        );
    }

    #[test]
    fn company_rejects_birthdate() {
        let err = NewClient::register(
            "acme@example.com".into(),
            "+15551234567".into(),
            "Acme Corp".into(),
            Some(birthdate()),
            Some("ACME-001".into()),
            now(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::BadRequest("Companies must not include a birthdate.".into())
        );
    }

    #[test]
    fn blank_company_identifier_means_person() {
        let new = NewClient::register(
            "jane.doe@example.com".into(),
            "+15551234567".into(),
            "Jane Doe".into(),
            Some(birthdate()),
            Some("   ".into()),
            now(),
        )
        .unwrap();
        assert_eq!(new.client_type, ClientType::Person);
        assert_eq!(new.birthdate, Some(birthdate()));
        assert_eq!(new.company_identifier, None);
    }

    #[test]
    fn company_cross_nulls_birthdate_field() {
        let new = NewClient::register(
            "acme@example.com".into(),
            "+15551234567".into(),
            "Acme Corp".into(),
            None,
            Some("ACME-001".into()),
            now(),
        )
        .unwrap();
        assert_eq!(new.client_type, ClientType::Company);
        assert_eq!(new.birthdate, None);
        assert_eq!(new.company_identifier.as_deref(), Some("ACME-001"));
        assert_eq!(new.created_at, new.updated_at);
    }

    proptest! {
        /// Whatever combination of optional fields comes in, a successful
        /// registration ends up with exactly one of birthdate /
        /// company_identifier set.
        #[test]
        fn registration_sets_exactly_one_type_field(
            has_birthdate in any::<bool>(),
            identifier in proptest::option::of("[ A-Za-z0-9-]{0,12}"),
        ) {
            let birthdate = has_birthdate.then(birthdate);
            if let Ok(new) = NewClient::register(
                "p@example.com".into(),
                "+15551234567".into(),
                "P".into(),
                birthdate,
                identifier,
                now(),
            ) {
                prop_assert_ne!(new.birthdate.is_some(), new.company_identifier.is_some());
                match new.client_type {
                    ClientType::Person => prop_assert!(new.birthdate.is_some()),
                    ClientType::Company => prop_assert!(new.company_identifier.is_some()),
                }
            }
        }
    }
}
