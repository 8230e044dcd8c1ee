use serde::{Deserialize, Serialize};

/// Business sector of the merchant requesting a site.
///
/// The wire values are the French labels the storefront frontend sends;
/// an unknown label fails deserialization, which is how enum-membership
/// validation is enforced at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    #[serde(rename = "Mode & Vêtements")]
    Fashion,
    #[serde(rename = "Électronique & Technologie")]
    Electronics,
    #[serde(rename = "Santé & Beauté")]
    HealthBeauty,
    #[serde(rename = "Maison & Jardin")]
    HomeGarden,
    #[serde(rename = "Sport & Fitness")]
    SportsFitness,
    #[serde(rename = "Alimentation & Boissons")]
    FoodBeverage,
    #[serde(rename = "Livres & Médias")]
    BooksMedia,
    #[serde(rename = "Bijoux & Accessoires")]
    Jewelry,
    #[serde(rename = "Art & Artisanat")]
    ArtCrafts,
    #[serde(rename = "Autre")]
    Other,
}

impl Industry {
    pub const ALL: [Industry; 10] = [
        Industry::Fashion,
        Industry::Electronics,
        Industry::HealthBeauty,
        Industry::HomeGarden,
        Industry::SportsFitness,
        Industry::FoodBeverage,
        Industry::BooksMedia,
        Industry::Jewelry,
        Industry::ArtCrafts,
        Industry::Other,
    ];

    /// French label, as embedded verbatim into model prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Industry::Fashion => "Mode & Vêtements",
            Industry::Electronics => "Électronique & Technologie",
            Industry::HealthBeauty => "Santé & Beauté",
            Industry::HomeGarden => "Maison & Jardin",
            Industry::SportsFitness => "Sport & Fitness",
            Industry::FoodBeverage => "Alimentation & Boissons",
            Industry::BooksMedia => "Livres & Médias",
            Industry::Jewelry => "Bijoux & Accessoires",
            Industry::ArtCrafts => "Art & Artisanat",
            Industry::Other => "Autre",
        }
    }
}

/// Visual style requested by the merchant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StylePreference {
    #[serde(rename = "moderne")]
    Modern,
    #[serde(rename = "classique")]
    Classic,
    #[serde(rename = "minimaliste")]
    Minimalist,
    #[serde(rename = "audacieux")]
    Bold,
    #[serde(rename = "élégant")]
    Elegant,
    #[serde(rename = "ludique")]
    Playful,
    #[serde(rename = "professionnel")]
    Professional,
}

impl StylePreference {
    pub fn label(&self) -> &'static str {
        match self {
            StylePreference::Modern => "moderne",
            StylePreference::Classic => "classique",
            StylePreference::Minimalist => "minimaliste",
            StylePreference::Bold => "audacieux",
            StylePreference::Elegant => "élégant",
            StylePreference::Playful => "ludique",
            StylePreference::Professional => "professionnel",
        }
    }
}
