use serde::{Deserialize, Deserializer};
use serde_json::Value;

// response
//  └── Result[]
//       ├── project
//       ├── street
//       ├── x
//       ├── y
//       ├── transaction[]          (resale / new sale service)
//       │    ├── area
//       │    ├── floorRange
//       │    ├── noOfUnits
//       │    ├── contractDate
//       │    ├── typeOfSale
//       │    ├── price
//       │    ├── propertyType
//       │    ├── district
//       │    ├── typeOfArea
//       │    ├── tenure
//       │    └── marketSegment
//       └── rental[]               (rental service)
//            ├── areaSqm
//            ├── rent
//            ├── leaseDate
//            ├── propertyType
//            └── district

/// Top-level body. `Result` is optional: the service answers
/// `{"Status": "...", "Message": "..."}` with no data for empty windows.
#[derive(Debug, Deserialize)]
pub struct UraResponse {
    #[serde(rename = "Result")]
    pub result: Option<Vec<Project>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "lenient_string")]
    pub project: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub street: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub x: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub y: String,

    #[serde(default, deserialize_with = "lenient_vec")]
    pub transaction: Vec<Transaction>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub rental: Vec<Rental>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, deserialize_with = "lenient_string")]
    pub area: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub floor_range: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub no_of_units: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub contract_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub type_of_sale: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub property_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub district: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub type_of_area: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tenure: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub market_segment: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    #[serde(default, deserialize_with = "lenient_string")]
    pub area_sqm: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rent: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lease_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub property_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub district: String,
}

/// Accepts strings, numbers, booleans and null. Null becomes `""`, scalars
/// keep their JSON text form.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

/// `null` in place of an array means no entries.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
