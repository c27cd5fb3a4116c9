use serde::{Deserialize, Serialize};

/// One entry of the interests catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestItem {
    /// Catalog id, 1-based
    pub id: u32,
    /// Display label
    pub name: String,
    /// Whether the user has picked this interest
    pub selected: bool,
}

/// Pagination block returned alongside a catalog page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub page_size: u32,
}

/// One page of the catalog, in wire shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestPage {
    pub interests: Vec<InterestItem>,
    pub pagination: Pagination,
}

/// Reference catalog shipped with the storefront, in display order
pub const INTEREST_CATALOG: [&str; 60] = [
    "Shoes",
    "Men T-shirts",
    "Makeup",
    "Jewellery",
    "Women T-shirts",
    "Furniture",
    "Electronics",
    "Books",
    "Gadgets",
    "Sportswear",
    "Home Decor",
    "Toys",
    "Kitchenware",
    "Bags",
    "Accessories",
    "Pet Supplies",
    "Fitness Equipment",
    "Beauty Products",
    "Travel Gear",
    "Garden Supplies",
    "Art Supplies",
    "Watches",
    "Sunglasses",
    "Office Supplies",
    "Stationery",
    "Laptops",
    "Mobile Phones",
    "Cameras",
    "Headphones",
    "Speakers",
    "Projectors",
    "Printers",
    "Smart Watches",
    "Fitness Trackers",
    "Gaming Consoles",
    "Board Games",
    "Puzzles",
    "Gift Cards",
    "Candles",
    "Bath & Body",
    "Perfumes",
    "Skincare",
    "Haircare",
    "Health Supplements",
    "Organic Foods",
    "Dairy Products",
    "Bakery Items",
    "Frozen Foods",
    "Soft Drinks",
    "Energy Drinks",
    "Juices",
    "Snacks",
    "Condiments",
    "Spices",
    "Grains",
    "Vegetables",
    "Fruits",
    "Meat & Poultry",
    "Seafood",
    "Cereals",
];

/// Build the default catalog, ids 1..=60, nothing selected
pub fn default_catalog() -> Vec<InterestItem> {
    INTEREST_CATALOG
        .iter()
        .enumerate()
        .map(|(idx, name)| InterestItem {
            id: idx as u32 + 1,
            name: (*name).to_string(),
            selected: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_sixty_unique_entries() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 60);
        let mut names: Vec<&str> = INTEREST_CATALOG.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 60);
        assert_eq!(catalog[0].id, 1);
        assert_eq!(catalog[59].id, 60);
    }

    #[test]
    fn pagination_serializes_camel_case() {
        let pagination = Pagination {
            total: 60,
            total_pages: 6,
            current_page: 3,
            page_size: 10,
        };
        let value = serde_json::to_value(&pagination).unwrap();
        assert_eq!(value["totalPages"], 6);
        assert_eq!(value["currentPage"], 3);
        assert_eq!(value["pageSize"], 10);
    }
}
