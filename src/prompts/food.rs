//! Food photo analysis prompt

use std::path::Path;

use serde::Serialize;

use super::PromptError;

/// Instruction sent together with a food photo
pub const FOOD_ANALYSIS_PROMPT: &str = r#"You are an expert nutritionist. Look at the food items in the image
and calculate the total calories. List every food item with its calorie
intake in the following format:

1. Item 1 - no of calories
2. Item 2 - no of calories
----
----

Finally, say whether the meal is healthy or not and give the percentage split
of carbohydrates, protein, fats, fibre, sugar and any other nutrients that
matter in a daily diet."#;

/// Line shown next to the model's answer
pub fn calorie_reminder(kcal_per_day: f64) -> String {
    format!(
        "Reminder: Total Calories needed by your body is: {} kcal",
        kcal_per_day
    )
}

/// Accepted upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageType {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
}

impl ImageType {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageType::Jpeg => "image/jpeg",
            ImageType::Png => "image/png",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageType::Jpeg),
            "image/png" => Some(ImageType::Png),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageType::Jpeg),
            "png" => Some(ImageType::Png),
            _ => None,
        }
    }
}

/// An uploaded food photo, ready to be attached to the prompt
#[derive(Debug, Clone)]
pub struct FoodImage {
    pub image_type: ImageType,
    pub data: Vec<u8>,
}

impl FoodImage {
    pub fn new(mime_type: &str, data: Vec<u8>) -> Result<Self, PromptError> {
        if data.is_empty() {
            return Err(PromptError::MissingImage);
        }
        let image_type = ImageType::from_mime(mime_type)
            .ok_or_else(|| PromptError::UnsupportedImageType(mime_type.to_string()))?;
        Ok(Self { image_type, data })
    }

    /// Load an image file, inferring the type from its extension.
    ///
    /// A missing or empty file is [`PromptError::MissingImage`] whatever its name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PromptError> {
        let path = path.as_ref();

        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PromptError::MissingImage)
            }
            Err(e) => return Err(e.into()),
        };
        if data.is_empty() {
            return Err(PromptError::MissingImage);
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let image_type = ImageType::from_extension(ext)
            .ok_or_else(|| PromptError::UnsupportedImageType(ext.to_string()))?;

        Ok(Self { image_type, data })
    }

    pub fn mime_type(&self) -> &'static str {
        self.image_type.mime_type()
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_image(name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path =
            std::env::temp_dir().join(format!("healthtrack-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_reminder_text() {
        assert_eq!(
            calorie_reminder(2062.5),
            "Reminder: Total Calories needed by your body is: 2062.5 kcal"
        );
    }

    #[test]
    fn test_prompt_asks_for_itemized_calories() {
        assert!(FOOD_ANALYSIS_PROMPT.contains("1. Item 1 - no of calories"));
        assert!(FOOD_ANALYSIS_PROMPT.contains("carbohydrates"));
    }

    #[test]
    fn test_image_type_from_mime() {
        assert_eq!(ImageType::from_mime("image/JPG"), Some(ImageType::Jpeg));
        assert_eq!(ImageType::from_mime("image/png"), Some(ImageType::Png));
        assert_eq!(ImageType::from_mime("image/gif"), None);
    }

    #[test]
    fn test_empty_upload_is_missing() {
        let err = FoodImage::new("image/png", Vec::new()).unwrap_err();
        assert!(matches!(err, PromptError::MissingImage));
    }

    #[test]
    fn test_unsupported_upload() {
        let err = FoodImage::new("image/webp", vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, PromptError::UnsupportedImageType(ref t) if t == "image/webp"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = FoodImage::from_path("/definitely/not/here/lunch.jpg").unwrap_err();
        assert!(matches!(err, PromptError::MissingImage));
    }

    #[test]
    fn test_from_path_missing_file_without_extension() {
        let err = FoodImage::from_path("/definitely/not/here/lunch").unwrap_err();
        assert!(matches!(err, PromptError::MissingImage));
    }

    #[test]
    fn test_from_path_wrong_extension() {
        let path = temp_image("dinner.gif", b"GIF89a");
        let err = FoodImage::from_path(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, PromptError::UnsupportedImageType(ref ext) if ext == "gif"));
    }

    #[test]
    fn test_from_path_reads_file() {
        let path = temp_image("breakfast.png", &[0x89, b'P', b'N', b'G']);
        let image = FoodImage::from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.size_bytes(), 4);
    }
}
