use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FoodCategory {
    MainCourse,
    Dessert,
    Drink,
    Salad,
    Snack,
    Breakfast,
    Soup,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 7] = [
        FoodCategory::MainCourse,
        FoodCategory::Dessert,
        FoodCategory::Drink,
        FoodCategory::Salad,
        FoodCategory::Snack,
        FoodCategory::Breakfast,
        FoodCategory::Soup,
    ];

    /// Identifier used by shortcuts and config, e.g. `mainCourse`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::MainCourse => "mainCourse",
            Self::Dessert => "dessert",
            Self::Drink => "drink",
            Self::Salad => "salad",
            Self::Snack => "snack",
            Self::Breakfast => "breakfast",
            Self::Soup => "soup",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MainCourse => "Ana Yemek",
            Self::Dessert => "Tatlı",
            Self::Drink => "İçecek",
            Self::Salad => "Salata",
            Self::Snack => "Atıştırmalık",
            Self::Breakfast => "Kahvaltı",
            Self::Soup => "Çorba",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FoodCategory {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.key() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HealthTag {
    Vegan,
    GlutenFree,
    LowCarb,
    HighProtein,
    NutFree,
    ContainsNuts,
    Organic,
    DairyFree,
    Spicy,
    Vegetarian,
}

impl HealthTag {
    pub const ALL: [HealthTag; 10] = [
        HealthTag::Vegan,
        HealthTag::GlutenFree,
        HealthTag::LowCarb,
        HealthTag::HighProtein,
        HealthTag::NutFree,
        HealthTag::ContainsNuts,
        HealthTag::Organic,
        HealthTag::DairyFree,
        HealthTag::Spicy,
        HealthTag::Vegetarian,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Vegan => "vegan",
            Self::GlutenFree => "glutenFree",
            Self::LowCarb => "lowCarb",
            Self::HighProtein => "highProtein",
            Self::NutFree => "nutFree",
            Self::ContainsNuts => "containsNuts",
            Self::Organic => "organic",
            Self::DairyFree => "dairyFree",
            Self::Spicy => "spicy",
            Self::Vegetarian => "vegetarian",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Glutensiz",
            Self::LowCarb => "Düşük Karbonhidrat",
            Self::HighProtein => "Yüksek Protein",
            Self::NutFree => "Fındıksız",
            Self::ContainsNuts => "Fındıklı",
            Self::Organic => "Organik",
            Self::DairyFree => "Süt İçermez",
            Self::Spicy => "Baharatlı",
            Self::Vegetarian => "Vejetaryan",
        }
    }
}

impl fmt::Display for HealthTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for HealthTag {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.key() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key '{0}'")]
pub struct UnknownKey(pub String);

/// Money in minor units (kuruş).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Price(pub u64);

impl Price {
    pub fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl std::ops::Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::default(), |acc, price| acc + price)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₺{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub is_optional: bool,
}

impl Ingredient {
    pub fn new(name: &str, icon: Option<&str>, is_optional: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            icon: icon.map(str::to_string),
            is_optional,
        }
    }

    pub fn label(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{} {}", icon, self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub calories: u32,
    pub price: Price,
    pub image_url: String,
    pub gradient: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub options: Vec<String>,
    pub detail: String,
    pub category: FoodCategory,
    pub health_tags: Vec<HealthTag>,
}

impl MenuItem {
    pub fn has_all_tags<'a>(&self, tags: impl IntoIterator<Item = &'a HealthTag>) -> bool {
        tags.into_iter().all(|tag| self.health_tags.contains(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keys_round_trip() {
        for category in FoodCategory::ALL {
            assert_eq!(category.key().parse::<FoodCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert_eq!(
            "pizza".parse::<FoodCategory>(),
            Err(UnknownKey("pizza".to_string()))
        );
        // Keys are case sensitive
        assert!("MainCourse".parse::<FoodCategory>().is_err());
    }

    #[test]
    fn test_health_tag_parse() {
        assert_eq!("glutenFree".parse::<HealthTag>(), Ok(HealthTag::GlutenFree));
        assert!("not-a-real-tag".parse::<HealthTag>().is_err());
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_minor(999).to_string(), "₺9.99");
        assert_eq!(Price::from_minor(1000).to_string(), "₺10.00");
        assert_eq!(Price::from_minor(5).to_string(), "₺0.05");
    }

    #[test]
    fn test_price_arithmetic() {
        let total: Price = [Price(250), Price(100).times(3)].into_iter().sum();
        assert_eq!(total, Price(550));
    }

    #[test]
    fn test_price_arithmetic_saturates() {
        assert_eq!(Price(u64::MAX).times(2), Price(u64::MAX));
        assert_eq!(Price(u64::MAX) + Price(1), Price(u64::MAX));
    }

    #[test]
    fn test_ingredient_label() {
        let with_icon = Ingredient::new("Tavuk", Some("🍗"), false);
        let without_icon = Ingredient::new("Tuz", None, true);
        assert_eq!(with_icon.label(), "🍗 Tavuk");
        assert_eq!(without_icon.label(), "Tuz");
    }
}
