//! Static device and content dimensions.
//!
//! Both catalogs are fixed: every generator run inserts exactly these rows.

use serde::{Deserialize, Serialize};

use crate::attributes::ConnectionType;

/// A playback platform (row of `dim_Devices`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
  pub platform:        String,
  pub app_version:     String,
  pub connection_type: ConnectionType,
}

/// A title in the catalogue (row of `dim_MediaContent`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaContent {
  pub title:               String,
  pub category:            String,
  pub sub_genre:           String,
  pub production_cost_usd: f64,
  /// 0.0 – 10.0
  pub rating_imdb:         f64,
  pub target_audience:     String,
}

fn device(platform: &str, app_version: &str, connection_type: ConnectionType) -> Device {
  Device {
    platform: platform.to_owned(),
    app_version: app_version.to_owned(),
    connection_type,
  }
}

fn content(
  title: &str,
  category: &str,
  sub_genre: &str,
  production_cost_usd: f64,
  rating_imdb: f64,
  target_audience: &str,
) -> MediaContent {
  MediaContent {
    title: title.to_owned(),
    category: category.to_owned(),
    sub_genre: sub_genre.to_owned(),
    production_cost_usd,
    rating_imdb,
    target_audience: target_audience.to_owned(),
  }
}

/// TV, mobile, web and smart-TV platforms.
pub fn device_catalog() -> Vec<Device> {
  vec![
    device("Android TV", "2.4.1", ConnectionType::WiFi),
    device("iOS Mobile", "3.0.1", ConnectionType::FiveG),
    device("Web Browser", "Chrome 120", ConnectionType::Ethernet),
    device("Samsung Tizen", "1.5.0", ConnectionType::WiFi),
  ]
}

/// A mix of series, reality, news and film with costs and ratings.
pub fn content_catalog() -> Vec<MediaContent> {
  vec![
    content("Ordinace v Ruzove zahrade 2", "Series", "Soap", 50_000.0, 4.5, "Adults"),
    content("Specialiste", "Series", "Crime", 120_000.0, 7.2, "Adults"),
    content("Love Island", "Reality", "Romance", 80_000.0, 6.0, "Young Adults"),
    content("Televizni Noviny", "News", "Daily", 10_000.0, 5.5, "General"),
    content("Harry Potter", "Movie", "Fantasy", 1_000_000.0, 8.5, "Kids"),
    content("MasterChef Cesko", "Reality", "Cooking", 90_000.0, 8.0, "General"),
  ]
}
