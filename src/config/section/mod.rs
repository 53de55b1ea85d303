//! Configuration section definitions.
//!
//! Each module corresponds to a section in `sitehook.toml`:
//!
//! | Module    | TOML Section      | Purpose                              |
//! |-----------|-------------------|--------------------------------------|
//! | `site`    | `[site]`          | Canonical site URL                   |
//! | `theme`   | `[theme.umami]`   | Analytics host to mirror             |
//! | `badge`   | `[badge]`         | Badge source image and service       |
//! | `caption` | `[image_caption]` | Caption feature flag and class name  |
//! | `build`   | `[build]`         | Output, posts and redirects paths    |

mod badge;
mod build;
mod caption;
mod site;
mod theme;

pub use badge::BadgeConfig;
pub use build::BuildSectionConfig;
pub use caption::ImageCaptionConfig;
pub use site::SiteSectionConfig;
pub use theme::{ThemeSectionConfig, UmamiConfig};
