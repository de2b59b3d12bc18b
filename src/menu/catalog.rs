use super::models::{FoodCategory, HealthTag, Ingredient, MenuItem, Price};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, id: Uuid) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The built-in menu. Ingredients are shared between dishes, so the same
    /// ingredient compares equal wherever it appears.
    pub fn seeded() -> Self {
        let chicken = Ingredient::new("Tavuk", Some("🍗"), false);
        let lettuce = Ingredient::new("Marul", Some("🥬"), false);
        let tomato = Ingredient::new("Domates", Some("🍅"), false);
        let hazelnut = Ingredient::new("Fındık", Some("🌰"), true);
        let bread = Ingredient::new("Ekmek", Some("🍞"), true);
        let yogurt = Ingredient::new("Yoğurt", Some("🥛"), true);

        use FoodCategory as C;
        use HealthTag as T;

        let items = vec![
            Seed {
                name: "Izgara Tavuk Göğsü",
                description: "Taze otlarla marine edilmiş yumuşak ızgara tavuk göğsü.",
                calories: 220,
                price: 999,
                image: "chicken",
                gradient: ["#FFDEB6", "#FFB4AB"],
                ingredients: vec![chicken.clone(), lettuce.clone()],
                options: ["Ekstra Sos", "Tuzsuz"],
                detail: "Taze otlarla hafifçe baharatlanmış ızgara tavuk.",
                category: C::MainCourse,
                tags: vec![T::HighProtein, T::LowCarb, T::GlutenFree, T::NutFree, T::Organic],
            },
            Seed {
                name: "Sezar Salata",
                description: "Romaine marullu ve parmesan peynirli klasik Sezar salata.",
                calories: 180,
                price: 749,
                image: "salad",
                gradient: ["#D0F0C0", "#A8E6CF"],
                ingredients: vec![lettuce.clone(), tomato.clone()],
                options: ["Kruton Ekle", "Ekstra Sos"],
                detail: "Taze romaine marul, parmesan ve kremalı Sezar sos ile.",
                category: C::Salad,
                tags: vec![T::Vegetarian, T::NutFree, T::Organic],
            },
            Seed {
                name: "Çikolatalı Brownie",
                description: "Cevizli zengin çikolatalı brownie.",
                calories: 350,
                price: 499,
                image: "brownie",
                gradient: ["#7B3F00", "#B5651D"],
                ingredients: vec![hazelnut.clone(), yogurt.clone()],
                options: ["Dondurma Ekle", "Kuruyemişsiz"],
                detail: "Çıtır cevizli leziz çikolatalı brownie.",
                category: C::Dessert,
                tags: vec![T::Vegetarian, T::ContainsNuts, T::Organic],
            },
            Seed {
                name: "Taze Portakal Suyu",
                description: "Katkısız, taze sıkılmış portakal suyu.",
                calories: 110,
                price: 399,
                image: "orange-juice",
                gradient: ["#FFA500", "#FFD580"],
                ingredients: vec![tomato.clone()],
                options: ["Buz Ekle", "Posasız"],
                detail: "Taze sıkılmış portakallardan hazırlanan ferahlatıcı portakal suyu.",
                category: C::Drink,
                tags: vec![T::Vegan, T::GlutenFree, T::DairyFree, T::Organic],
            },
            Seed {
                name: "Baharatlı Tofu Sote",
                description: "Sebzeli ve baharatlı soslu tofu sote.",
                calories: 280,
                price: 850,
                image: "tofu",
                gradient: ["#FF6F61", "#FF9671"],
                ingredients: vec![lettuce.clone(), tomato.clone()],
                options: ["Daha Acı", "Pilav Ekle"],
                detail: "Taze sebzelerle lezzetli baharatlı sos içinde sote edilmiş tofu.",
                category: C::MainCourse,
                tags: vec![T::Vegan, T::GlutenFree, T::Spicy, T::DairyFree, T::Organic],
            },
            Seed {
                name: "Avokado Tost",
                description: "Tam tahıllı tost üzerine ezilmiş avokado ve pul biber.",
                calories: 250,
                price: 675,
                image: "avocado-toast",
                gradient: ["#A3D2CA", "#5EAAA8"],
                ingredients: vec![bread.clone(), tomato.clone()],
                options: ["Yumurta Ekle", "Ekstra Pul Biber"],
                detail: "Kremamsı ezilmiş avokado ve hafif baharatla tamamlanmış tam tahıllı tost.",
                category: C::Breakfast,
                tags: vec![T::Vegan, T::GlutenFree, T::DairyFree, T::Organic],
            },
            Seed {
                name: "Minestrone Çorbası",
                description: "Fasulye ve makarna içeren doyurucu sebze çorbası.",
                calories: 150,
                price: 525,
                image: "soup",
                gradient: ["#F2D7D9", "#D9E4DD"],
                ingredients: vec![lettuce.clone(), tomato.clone()],
                options: ["Peynir Ekle", "Ekstra Makarna"],
                detail: "Fasulye, makarna ve taze sebzelerle zenginleştirilmiş klasik İtalyan sebze çorbası.",
                category: C::Soup,
                tags: vec![T::Vegetarian, T::NutFree, T::Organic],
            },
            Seed {
                name: "Bademli Granola Bar",
                description: "Badem ve bal içeren çıtır granola bar.",
                calories: 190,
                price: 299,
                image: "granola-bar",
                gradient: ["#FFE9B1", "#FFB347"],
                ingredients: vec![hazelnut.clone(), bread.clone()],
                options: ["Çikolata Parçacıkları Ekle", "Glutensiz"],
                detail: "Badem dolu ve hafif bal aromalı tatlı çıtır granola bar.",
                category: C::Snack,
                tags: vec![T::Vegetarian, T::ContainsNuts, T::HighProtein, T::Organic],
            },
            Seed {
                name: "Yunan Yoğurtlu Parfe",
                description: "Yunan yoğurdu, meyveler ve granola katmanları.",
                calories: 220,
                price: 599,
                image: "yogurt-parfait",
                gradient: ["#D4F1F4", "#75E6DA"],
                ingredients: vec![yogurt.clone(), bread],
                options: ["Bal Ekle", "Ekstra Meyve"],
                detail: "Kremamsı Yunan yoğurdu, taze meyveler ve çıtır granola katmanları.",
                category: C::Breakfast,
                tags: vec![T::Vegetarian, T::GlutenFree, T::HighProtein, T::Organic],
            },
            Seed {
                name: "Fıstık Ezmeli Smoothie",
                description: "Fıstık ezmesi, muz ve badem sütü ile kremamsı smoothie.",
                calories: 320,
                price: 650,
                image: "peanut-butter-smoothie",
                gradient: ["#FAD7A0", "#F9D976"],
                ingredients: vec![hazelnut, yogurt],
                options: ["Protein Tozu Ekle", "Şekersiz"],
                detail: "Fıstık ezmesini muz ve badem sütü ile harmanlayan yumuşak ve kremsi smoothie.",
                category: C::Drink,
                tags: vec![T::Vegetarian, T::GlutenFree, T::HighProtein, T::ContainsNuts],
            },
        ];

        Self::new(items.into_iter().map(Seed::into_item).collect())
    }
}

struct Seed {
    name: &'static str,
    description: &'static str,
    calories: u32,
    price: u64,
    image: &'static str,
    gradient: [&'static str; 2],
    ingredients: Vec<Ingredient>,
    options: [&'static str; 2],
    detail: &'static str,
    category: FoodCategory,
    tags: Vec<HealthTag>,
}

impl Seed {
    fn into_item(self) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            calories: self.calories,
            price: Price::from_minor(self.price),
            image_url: format!("https://source.unsplash.com/featured/?{}", self.image),
            gradient: self.gradient.iter().map(|c| c.to_string()).collect(),
            ingredients: self.ingredients,
            options: self.options.iter().map(|o| o.to_string()).collect(),
            detail: self.detail.to_string(),
            category: self.category,
            health_tags: self.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seeded_catalog_has_ten_items() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.items().len(), 10);
    }

    #[test]
    fn test_seeded_ids_are_unique() {
        let catalog = Catalog::seeded();
        let ids: HashSet<_> = catalog.items().iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), catalog.items().len());
    }

    #[test]
    fn test_find_by_id() {
        let catalog = Catalog::seeded();
        let tofu = &catalog.items()[4];
        assert_eq!(catalog.find(tofu.id).map(|i| i.name.as_str()), Some("Baharatlı Tofu Sote"));
        assert!(catalog.find(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_shared_ingredients_compare_equal() {
        let catalog = Catalog::seeded();
        let salad_lettuce = &catalog.items()[1].ingredients[0];
        let chicken_lettuce = &catalog.items()[0].ingredients[1];
        assert_eq!(salad_lettuce, chicken_lettuce);
    }
}
