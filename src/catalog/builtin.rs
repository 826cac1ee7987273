use crate::catalog::models::CatalogProduct;

/// Products shipped with the application: (name, cost). None of them carry a
/// list price or discount yet.
const BUILTIN_PRODUCTS: &[(&str, f64)] = &[
    ("[DESK] THOMAS MASON OFFICE SHIRT", 85892.0),
    ("[DESK] BASIC STEEL TIE [NAVY]", 15992.0),
    ("[DESK] GRAND CRU WOOL V-NECK KNIT [BLACK]", 42850.0),
    ("[DESK] GRAND CRU WOOL MOCK-NECK KNIT [CHARCOAL]", 46238.0),
    ("[DESK] GRAND CRU WOOL V-NECK KNIT [CHARCOAL]", 46238.0),
    ("[DESK] GRAND CRU WOOL V-NECK KNIT [DARK NAVY]", 46238.0),
    ("[DESK] GRAND CRU WOOL V-NECK KNIT [DEEP BROWN]", 46238.0),
    ("[DESK] GRAND CRU WOOL V-NECK KNIT [MELANGE GRAY]", 46238.0),
    ("[DESK] GRAND CRU WOOL V-NECK KNIT [SILVER BLUE]", 46238.0),
    ("[DESK] NATURAL CHINO JACKET [WASHED BLACK]", 59290.0),
    ("[DESK] NATURAL CHINO JACKET [WASHED CHARCOAL]", 72566.0),
    ("[DESK] NATURAL CHINO JACKET [WASHED NAVY]", 88629.0),
    ("[DESK] NATURAL CHINO PANTS [LIGHT BEIGE]", 61974.0),
    ("[DESK] NATURAL CHINO PANTS [WASHED BEIGE]", 54329.0),
    ("[DESK] NATURAL CHINO PANTS [WASHED BLACK]", 42561.0),
    ("[DESK] NATURAL CHINO PANTS [WASHED CHARCOAL]", 51480.0),
    ("[DESK] NATURAL CHINO PANTS [WASHED KHAKI]", 57475.0),
    ("[DESK] NATURAL CHINO PANTS [WASHED NAVY]", 51480.0),
    ("[DESK] OFFICE HALF SHIRT [LIGHT BLUE]", 29576.0),
    ("[DESK] OFFICE HALF SHIRT [LIGHT GRAY]", 29576.0),
    ("[DESK] OFFICE SHIRT [DEEP CHARCOAL]", 30962.0),
    ("[DESK] OFFICE SHIRT [FOG]", 33393.0),
    ("[DESK] OFFICE SHIRT [GRAPHITE]", 33393.0),
    ("[DESK] OFFICE SHIRT [GRAY]", 33393.0),
    ("[DESK] OFFICE SHIRT [ICE BLUE]", 30962.0),
    ("[DESK] OFFICE SHIRT [INK NAVY]", 30962.0),
    ("[DESK] OFFICE SHIRT [WHITE]", 33393.0),
];

/// The built-in product list
pub fn builtin_products() -> Vec<CatalogProduct> {
    BUILTIN_PRODUCTS
        .iter()
        .map(|&(name, cost)| CatalogProduct {
            name: name.to_string(),
            cost,
            price: 0.0,
            discount: 0.0,
        })
        .collect()
}
