//! Drafts for the flat entity forms (exercises, banners)
//!
//! A form owns a draft seeded from an existing record or from defaults, turns
//! it into an [`ApiRequest`] and tracks the submission.

use chrono::{NaiveDate, NaiveTime, SecondsFormat};
use std::sync::Arc;

use crate::api::{ApiRequest, Backend, Part, Payload};
use crate::error::{Error, Result};
use crate::models::{Banner, Exercise, Target};
use crate::submit::Submitter;
use crate::upload::ImageField;

/// Shared submit flow: build the request, then hand it to the submitter.
pub trait EntityForm {
    /// Validate the draft and build the create-or-update request.
    fn request(&self) -> Result<ApiRequest>;

    fn submitter(&mut self) -> &mut Submitter;

    fn submit(&mut self, backend: Arc<dyn Backend>) -> Result<()> {
        if self.submitter().is_submitting() {
            return Err(Error::SubmitInFlight);
        }
        match self.request() {
            Ok(request) => self.submitter().submit(backend, request),
            Err(e) => {
                self.submitter().fail(&e);
                Err(e)
            }
        }
    }
}

fn require(ok: bool, field: &'static str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::Validation { field })
    }
}

// ─────────────────────────────────────────────────────────────────
// Exercise
// ─────────────────────────────────────────────────────────────────

pub struct ExerciseForm {
    editing_id: Option<String>,
    pub draft: Exercise,
    /// GIF: a link, or an uploaded file that replaces it
    pub image: ImageField,
    submitter: Submitter,
}

impl ExerciseForm {
    pub fn new(existing: Option<&Exercise>) -> Self {
        let draft = existing.cloned().unwrap_or_default();
        Self {
            editing_id: existing.map(|e| e.id.clone()),
            image: ImageField::from_url(&draft.gif_url),
            draft,
            submitter: Submitter::default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() {
            "Update Exercise"
        } else {
            "Add Exercise"
        }
    }

    pub fn submitter_ref(&self) -> &Submitter {
        &self.submitter
    }

    pub fn toggle_secondary_muscle(&mut self, muscle: Target) {
        let muscles = &mut self.draft.secondary_muscles;
        match muscles.iter().position(|m| *m == muscle) {
            Some(idx) => {
                muscles.remove(idx);
            }
            None => muscles.push(muscle),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require(!self.draft.name.trim().is_empty(), "Name")?;
        require(self.draft.body_part.is_some(), "Body Part")?;
        require(self.draft.equipment.is_some(), "Equipment")?;
        require(!self.image.is_empty(), "GIF")?;
        require(self.draft.target.is_some(), "Target")?;
        require(self.draft.difficulty.is_some(), "Difficulty")
    }

    fn payload(&self) -> Result<Payload> {
        let mut draft = self.draft.clone();
        draft.id.clear();
        draft.gif_url = self.image.url.trim().to_string();

        let Some(file) = &self.image.file else {
            return Ok(Payload::Json(serde_json::to_value(&draft)?));
        };

        let mut parts = vec![Part::text("name", draft.name.trim())];
        let labels = [
            ("bodyPart", draft.body_part.map(|v| v.as_str())),
            ("equipment", draft.equipment.map(|v| v.as_str())),
            ("target", draft.target.map(|v| v.as_str())),
            ("difficulty", draft.difficulty.map(|v| v.as_str())),
        ];
        for (field, label) in labels {
            parts.push(Part::text(field, label.unwrap_or_default()));
        }
        parts.push(Part::text(
            "secondaryMuscles",
            serde_json::to_string(&draft.secondary_muscles)?,
        ));
        parts.push(Part::text("instructions", draft.instructions.as_str()));
        parts.push(Part::text("isBanned", draft.is_banned.to_string()));
        parts.push(file.clone().into_part("image"));
        Ok(Payload::Multipart(parts))
    }
}

impl EntityForm for ExerciseForm {
    fn request(&self) -> Result<ApiRequest> {
        self.validate()?;
        Ok(ApiRequest::save::<Exercise>(
            self.editing_id.as_deref(),
            self.payload()?,
        ))
    }

    fn submitter(&mut self) -> &mut Submitter {
        &mut self.submitter
    }
}

// ─────────────────────────────────────────────────────────────────
// Banner
// ─────────────────────────────────────────────────────────────────

pub struct BannerForm {
    editing_id: Option<String>,
    pub name: String,
    pub image: ImageField,
    pub expiry_date: Option<NaiveDate>,
    submitter: Submitter,
}

impl BannerForm {
    pub fn new(existing: Option<&Banner>) -> Self {
        match existing {
            Some(banner) => Self {
                editing_id: Some(banner.id.clone()),
                name: banner.name.clone(),
                image: ImageField::from_url(&banner.image_url),
                expiry_date: banner.expiry_date.map(|d| d.date_naive()),
                submitter: Submitter::default(),
            },
            None => Self {
                editing_id: None,
                name: String::new(),
                image: ImageField::default(),
                expiry_date: None,
                submitter: Submitter::default(),
            },
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() {
            "Update Banner"
        } else {
            "Create Banner"
        }
    }

    pub fn submitter_ref(&self) -> &Submitter {
        &self.submitter
    }

    pub fn validate(&self) -> Result<()> {
        require(!self.name.trim().is_empty(), "Banner Name")?;
        require(self.expiry_date.is_some(), "Expiry Date")
    }
}

/// Midnight UTC in the `2025-01-31T00:00:00.000Z` shape the backend stores.
fn iso_midnight(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl EntityForm for BannerForm {
    fn request(&self) -> Result<ApiRequest> {
        self.validate()?;
        let expiry = self
            .expiry_date
            .ok_or(Error::Validation { field: "Expiry Date" })?;

        let mut parts = vec![
            Part::text("name", self.name.trim()),
            Part::text("expiryDate", iso_midnight(expiry)),
        ];
        parts.extend(self.image.to_part("image", "imageUrl"));

        Ok(ApiRequest::save::<Banner>(
            self.editing_id.as_deref(),
            Payload::Multipart(parts),
        ))
    }

    fn submitter(&mut self) -> &mut Submitter {
        &mut self.submitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::models::{BodyPart, Difficulty, Equipment};
    use crate::upload::UploadedFile;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn filled_exercise() -> ExerciseForm {
        let mut form = ExerciseForm::new(None);
        form.draft.name = "Push up".to_string();
        form.draft.body_part = Some(BodyPart::Chest);
        form.draft.equipment = Some(Equipment::BodyWeight);
        form.draft.target = Some(Target::Pectorals);
        form.draft.difficulty = Some(Difficulty::Beginner);
        form.image.url = "https://cdn.example.com/pushup.gif".to_string();
        form
    }

    #[test]
    fn test_exercise_requires_fields_in_order() {
        let mut form = ExerciseForm::new(None);
        assert!(matches!(form.validate(), Err(Error::Validation { field: "Name" })));

        form.draft.name = "Row".to_string();
        assert!(matches!(
            form.validate(),
            Err(Error::Validation { field: "Body Part" })
        ));

        let mut form = filled_exercise();
        form.image.url.clear();
        assert!(matches!(form.validate(), Err(Error::Validation { field: "GIF" })));
    }

    #[test]
    fn test_exercise_without_file_posts_json() {
        let mut form = filled_exercise();
        form.toggle_secondary_muscle(Target::Triceps);
        form.toggle_secondary_muscle(Target::Delts);
        form.toggle_secondary_muscle(Target::Triceps);

        let request = form.request().unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "exercises");
        let Payload::Json(body) = request.payload else {
            panic!("expected JSON payload");
        };
        assert_eq!(body["name"], json!("Push up"));
        assert_eq!(body["equipment"], json!("body weight"));
        assert_eq!(body["secondaryMuscles"], json!(["delts"]));
        assert_eq!(body["gifUrl"], json!("https://cdn.example.com/pushup.gif"));
        assert!(body.get("_id").is_none());
    }

    #[test]
    fn test_exercise_with_file_patches_multipart() {
        let existing = Exercise {
            id: "ex1".to_string(),
            secondary_muscles: vec![Target::Triceps, Target::Delts],
            ..filled_exercise().draft
        };
        let mut form = ExerciseForm::new(Some(&existing));
        form.image.file = Some(UploadedFile::new("push.gif", vec![7, 7, 7]));

        let request = form.request().unwrap();

        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, "exercises/ex1");
        assert_eq!(
            request.payload.text_field("secondaryMuscles"),
            Some(r#"["triceps","delts"]"#)
        );
        assert_eq!(request.payload.text_field("target"), Some("pectorals"));
        assert!(request.payload.has_file("image"));
        assert_eq!(form.submit_label(), "Update Exercise");
    }

    #[test]
    fn test_banner_requires_name_and_expiry() {
        let mut form = BannerForm::new(None);
        assert!(matches!(
            form.request(),
            Err(Error::Validation { field: "Banner Name" })
        ));
        form.name = "Summer sale".to_string();
        assert!(matches!(
            form.request(),
            Err(Error::Validation { field: "Expiry Date" })
        ));
    }

    #[test]
    fn test_banner_create_sends_url_and_iso_date() {
        let mut form = BannerForm::new(None);
        form.name = "Summer sale".to_string();
        form.image.url = "https://cdn.example.com/summer.png".to_string();
        form.expiry_date = NaiveDate::from_ymd_opt(2025, 8, 31);

        let request = form.request().unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "banners");
        assert_eq!(
            request.payload.text_field("expiryDate"),
            Some("2025-08-31T00:00:00.000Z")
        );
        assert_eq!(
            request.payload.text_field("imageUrl"),
            Some("https://cdn.example.com/summer.png")
        );
        assert!(!request.payload.has_file("image"));
    }

    #[test]
    fn test_banner_edit_puts_file() {
        let banner = Banner {
            id: "b9".to_string(),
            name: "Winter".to_string(),
            image_url: "https://cdn.example.com/old.png".to_string(),
            expiry_date: Some(Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap()),
        };
        let mut form = BannerForm::new(Some(&banner));
        form.image.file = Some(UploadedFile::new("new.png", vec![1]));

        let request = form.request().unwrap();

        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "banners/b9");
        assert!(request.payload.has_file("image"));
        assert_eq!(request.payload.text_field("imageUrl"), None);
    }

    #[test]
    fn test_invalid_submit_marks_failed_without_sending() {
        use crate::api::testing::MockBackend;
        use crate::submit::SubmitState;

        let backend = Arc::new(MockBackend::default());
        let mut form = BannerForm::new(None);

        assert!(form.submit(backend.clone()).is_err());
        assert_eq!(
            form.submitter_ref().state(),
            &SubmitState::Failed("Banner Name is required".to_string())
        );
        assert!(backend.calls().is_empty());
    }
}
