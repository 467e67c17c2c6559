// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::error::Validation;

/// The server-assigned key of a project.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct ProjectId(String);

impl ProjectId {
    pub(crate) fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Accepts an ID typed by the user. It becomes one path segment, so the
    /// names that mean "this directory" or "the parent" are refused.
    pub(crate) fn parse(id: &str) -> Result<Self, Validation> {
        match id.trim() {
            "" | "." | ".." => Err(Validation::ProjectId),
            id => Ok(Self::new(id)),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct User {
    #[serde(rename = "_id", alias = "id", default)]
    pub(crate) id: Option<String>,
    pub(crate) name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) itson_id: Option<String>,
}

/// A successful login or registration.
#[derive(Debug, Deserialize)]
pub(crate) struct Authenticated {
    pub(crate) token: SecretString,
    pub(crate) user: User,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Project {
    #[serde(rename = "_id", alias = "id")]
    pub(crate) id: ProjectId,
    pub(crate) title: String,
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) repository: Option<String>,
    #[serde(default)]
    pub(crate) technologies: Vec<String>,
    #[serde(default)]
    pub(crate) images: Vec<String>,
}

/// The body of a create or update request. Empty optional fields are left
/// out of the JSON entirely, since the API distinguishes a missing key from
/// an empty value.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct ProjectData {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) repository: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) technologies: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) images: Vec<String>,
}

/// Whatever the server sends back after a deletion.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub(crate) struct Confirmation(serde_json::Value);

impl Confirmation {
    pub(crate) fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(serde_json::Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use serde_test::{assert_ser_tokens, Token};

    use crate::error::Result;

    use super::*;

    #[test]
    fn project_data_omits_empty_fields() {
        let data = ProjectData {
            title: "Folio".to_owned(),
            description: "Portfolio".to_owned(),
            repository: None,
            technologies: vec![],
            images: vec![],
        };

        assert_ser_tokens(
            &data,
            &[
                Token::Struct {
                    name: "ProjectData",
                    len: 2,
                },
                Token::Str("title"),
                Token::Str("Folio"),
                Token::Str("description"),
                Token::Str("Portfolio"),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn project_data_includes_present_fields() -> Result<()> {
        let data = ProjectData {
            title: "Folio".to_owned(),
            description: "Portfolio".to_owned(),
            repository: Some("https://example.com/folio".to_owned()),
            technologies: vec!["React".to_owned(), "Node".to_owned()],
            images: vec!["a.png".to_owned()],
        };

        assert_eq!(
            serde_json::to_value(&data)?,
            json!({
                "title": "Folio",
                "description": "Portfolio",
                "repository": "https://example.com/folio",
                "technologies": ["React", "Node"],
                "images": ["a.png"],
            })
        );
        Ok(())
    }

    #[test]
    fn project_accepts_either_id_key_and_missing_collections() -> Result<()> {
        let a: Project = serde_json::from_value(json!({
            "_id": "p1",
            "title": "A",
            "description": "first",
        }))?;
        let b: Project = serde_json::from_value(json!({
            "id": "p2",
            "title": "B",
            "description": "second",
            "technologies": ["Rust", "Rust"],
        }))?;

        assert_eq!(a.id.as_str(), "p1");
        assert!(a.technologies.is_empty());
        assert_eq!(a.repository, None);
        assert_eq!(b.id.as_str(), "p2");
        assert_eq!(b.technologies, ["Rust", "Rust"]);
        Ok(())
    }

    #[test]
    fn project_id_parse() {
        for id in ["", "  ", ".", ".."] {
            assert_eq!(ProjectId::parse(id), Err(Validation::ProjectId), "id {id:?}");
        }
        assert_eq!(ProjectId::parse(" p1 "), Ok(ProjectId::new("p1")));
        assert_eq!(
            ProjectId::parse("../auth/login"),
            Ok(ProjectId::new("../auth/login"))
        );
    }

    #[test]
    fn confirmation_message() -> Result<()> {
        let c: Confirmation = serde_json::from_value(json!({"message": "deleted"}))?;
        assert_eq!(c.message(), Some("deleted"));
        assert_eq!(Confirmation::default().message(), None);
        Ok(())
    }
}
