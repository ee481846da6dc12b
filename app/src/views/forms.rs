//! Form submission
//!
//! A form control carries its field names and prefilled values. Submitting
//! overlays the values the user entered and builds the action to dispatch.

use crate::actions::AppAction;
use crate::error::{AppError, Result};
use conduit_api::types::{ArticleDraft, LoginUser, NewUser, UserPatch};

/// Which form a control submits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    /// Sign in
    Login,
    /// Sign up
    Register,
    /// Edit the current user
    Settings,
    /// Publish an article
    Editor,
    /// Comment on an article
    Comment {
        /// Article commented on
        slug: String,
    },
}

impl FormKind {
    /// Control id of the form
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Login => "form-login",
            Self::Register => "form-register",
            Self::Settings => "form-settings",
            Self::Editor => "form-editor",
            Self::Comment { .. } => "form-comment",
        }
    }

    /// Field names, in display order
    #[must_use]
    pub const fn field_names(&self) -> &'static [&'static str] {
        match self {
            Self::Login => &["email", "password"],
            Self::Register => &["username", "email", "password"],
            Self::Settings => &["image", "username", "bio", "email", "password"],
            Self::Editor => &["title", "description", "body", "tags"],
            Self::Comment { .. } => &["body"],
        }
    }

    /// Fields with empty values
    #[must_use]
    pub fn blank_fields(&self) -> Vec<(String, String)> {
        self.field_names()
            .iter()
            .map(|name| ((*name).to_string(), String::new()))
            .collect()
    }
}

/// Build the action for a form submission
///
/// `prefilled` are the values the form was shown with; `entered` override
/// them by name.
///
/// # Errors
///
/// Returns [`AppError::UnknownField`] when `entered` names a field the form
/// does not have, and [`AppError::MissingField`] for an empty comment.
pub fn submit(
    kind: &FormKind,
    prefilled: &[(String, String)],
    entered: &[(String, String)],
) -> Result<AppAction> {
    let names = kind.field_names();
    if let Some((field, _)) = entered.iter().find(|(name, _)| !names.contains(&name.as_str())) {
        return Err(AppError::UnknownField {
            form: kind.id().to_string(),
            field: field.clone(),
        });
    }

    let value = |name: &str| -> String {
        entered
            .iter()
            .rev()
            .chain(prefilled.iter())
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    };

    let action = match kind {
        FormKind::Login => AppAction::Login {
            credentials: LoginUser {
                email: value("email"),
                password: value("password"),
            },
        },
        FormKind::Register => AppAction::Register {
            user: NewUser {
                username: value("username"),
                email: value("email"),
                password: value("password"),
            },
        },
        FormKind::Settings => {
            let password = value("password");
            AppAction::UpdateSettings {
                patch: UserPatch {
                    image: Some(value("image")),
                    username: Some(value("username")),
                    bio: Some(value("bio")),
                    email: Some(value("email")),
                    password: (!password.is_empty()).then_some(password),
                },
            }
        },
        FormKind::Editor => AppAction::PublishArticle {
            draft: ArticleDraft {
                title: value("title"),
                description: value("description"),
                body: value("body"),
                tag_list: ArticleDraft::parse_tags(&value("tags")),
            },
        },
        FormKind::Comment { slug } => {
            let body = value("body");
            if body.trim().is_empty() {
                return Err(AppError::MissingField {
                    form: kind.id().to_string(),
                    field: "body".to_string(),
                });
            }
            AppAction::PostComment {
                slug: slug.clone(),
                body,
            }
        },
    };

    Ok(action)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic)] // Tests are allowed to panic on failures

    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn login_fields_become_credentials() {
        let action = submit(
            &FormKind::Login,
            &FormKind::Login.blank_fields(),
            &pairs(&[("email", "a@b.c"), ("password", "hunter2")]),
        );
        assert!(matches!(
            action,
            Ok(AppAction::Login { credentials })
                if credentials.email == "a@b.c" && credentials.password == "hunter2"
        ));
    }

    #[test]
    fn settings_keep_prefilled_values_and_omit_empty_password() {
        let prefilled = pairs(&[
            ("image", ""),
            ("username", "alice"),
            ("bio", "hi"),
            ("email", "alice@conduit.test"),
            ("password", ""),
        ]);
        let Ok(AppAction::UpdateSettings { patch }) =
            submit(&FormKind::Settings, &prefilled, &pairs(&[("bio", "hello")]))
        else {
            panic!("expected a settings update");
        };
        assert_eq!(patch.bio.as_deref(), Some("hello"));
        assert_eq!(patch.username.as_deref(), Some("alice"));
        assert_eq!(patch.password, None);
    }

    #[test]
    fn editor_tags_are_split_and_trimmed() {
        let Ok(AppAction::PublishArticle { draft }) = submit(
            &FormKind::Editor,
            &FormKind::Editor.blank_fields(),
            &pairs(&[("title", "Dragons"), ("tags", " rust, ,dragons ,")]),
        ) else {
            panic!("expected a publish");
        };
        assert_eq!(draft.title, "Dragons");
        assert_eq!(draft.tag_list, vec!["rust", "dragons"]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = submit(&FormKind::Login, &[], &pairs(&[("username", "x")]));
        assert!(matches!(result, Err(AppError::UnknownField { field, .. }) if field == "username"));
    }

    #[test]
    fn blank_comments_are_rejected() {
        let kind = FormKind::Comment {
            slug: "dragons".into(),
        };
        let result = submit(&kind, &kind.blank_fields(), &pairs(&[("body", "   ")]));
        assert!(matches!(result, Err(AppError::MissingField { .. })));
    }
}
