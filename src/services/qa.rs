use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::asset::AssetDescriptor;
use crate::model::item::MigrationItem;
use crate::services::rich_text;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QaIssue {
    pub codename: String,
    pub code: String,
    pub message: String,
}

/// Report problems the importer is likely to reject. Never fails.
pub fn run(items: &[MigrationItem], assets: &[AssetDescriptor]) -> Vec<QaIssue> {
    let mut issues: Vec<QaIssue> = Vec::new();

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for item in items {
        *seen.entry(item.system.codename.as_str()).or_default() += 1;
    }

    for item in items {
        let codename = item.system.codename.as_str();

        if codename.is_empty() {
            issues.push(QaIssue {
                codename: codename.to_string(),
                code: "EMPTY_CODENAME".to_string(),
                message: format!("title '{}' has no codename characters", item.system.name),
            });
        } else if seen.get(codename).copied().unwrap_or(0) > 1 {
            issues.push(QaIssue {
                codename: codename.to_string(),
                code: "DUPLICATE_CODENAME".to_string(),
                message: format!("codename shared by more than one item ('{}')", item.system.name),
            });
        }

        if item.elements.category.value.iter().any(|c| c.codename.is_empty()) {
            issues.push(QaIssue {
                codename: codename.to_string(),
                code: "EMPTY_CATEGORY".to_string(),
                message: "genre list contains an empty entry".to_string(),
            });
        }

        for poster in &item.elements.poster.value {
            if !assets.iter().any(|a| a.codename == poster.codename) {
                issues.push(QaIssue {
                    codename: codename.to_string(),
                    code: "UNKNOWN_ASSET".to_string(),
                    message: format!("asset '{}' is not in the package", poster.codename),
                });
            }
        }

        let raw_heading = format!("<h1>{}</h1>", item.system.name);
        if rich_text::has_markup(&item.system.name)
            && item.elements.plot.value.value.contains(&raw_heading)
        {
            issues.push(QaIssue {
                codename: codename.to_string(),
                code: "MARKUP_IN_TEXT".to_string(),
                message: "title with markup characters embedded unescaped in plot".to_string(),
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::asset::AssetSpec;
    use crate::model::config::MigrationConfig;
    use crate::model::record::SourceRecord;
    use crate::services::mapper::Mapper;

    fn item(mapper: &Mapper, title: &str, genre: &str) -> MigrationItem {
        mapper
            .map_record(&SourceRecord {
                title: title.to_string(),
                language: "english".to_string(),
                genre: genre.to_string(),
                text: "plot".to_string(),
                duration: 90.0,
            })
            .unwrap()
    }

    fn teaser() -> Vec<AssetDescriptor> {
        let spec = AssetSpec {
            codename: "warrior_teaser".to_string(),
            filename: "warrior_teaser.jpg".to_string(),
            title: "Warrior teaser".to_string(),
            archive_filename: None,
        };
        vec![AssetDescriptor::from_bytes(&spec, vec![1, 2, 3])]
    }

    fn codes(issues: &[QaIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.code.as_str()).collect()
    }

    #[test]
    fn clean_batch_has_no_issues() {
        let mapper = Mapper::new(MigrationConfig::default());
        let items = vec![item(&mapper, "Warrior", "Drama, Sport")];
        assert!(run(&items, &teaser()).is_empty());
    }

    #[test]
    fn flags_duplicates_and_empty_codenames() {
        let mapper = Mapper::new(MigrationConfig::default());
        let items = vec![
            item(&mapper, "Heat", "Crime"),
            item(&mapper, "HEAT!", "Crime"),
            item(&mapper, "???", "Crime"),
        ];
        let issues = run(&items, &teaser());
        assert_eq!(
            codes(&issues),
            vec!["DUPLICATE_CODENAME", "DUPLICATE_CODENAME", "EMPTY_CODENAME"]
        );
    }

    #[test]
    fn flags_empty_category_and_unknown_asset() {
        let mapper = Mapper::new(MigrationConfig::default());
        let items = vec![item(&mapper, "Heat", "Crime,")];
        assert_eq!(codes(&run(&items, &[])), vec!["EMPTY_CATEGORY", "UNKNOWN_ASSET"]);
    }

    #[test]
    fn flags_markup_only_when_unescaped() {
        let raw = Mapper::new(MigrationConfig::default());
        let items = vec![item(&raw, "Tom & Jerry", "Comedy")];
        assert_eq!(codes(&run(&items, &teaser())), vec!["MARKUP_IN_TEXT"]);

        let escaping = Mapper::new(MigrationConfig {
            escape_html: true,
            ..MigrationConfig::default()
        });
        let items = vec![item(&escaping, "Tom & Jerry", "Comedy")];
        assert!(run(&items, &teaser()).is_empty());
    }

    #[test]
    fn escaped_title_that_still_contains_itself_is_clean() {
        let escaping = Mapper::new(MigrationConfig {
            escape_html: true,
            ..MigrationConfig::default()
        });

        // "Tom &" escapes to "Tom &amp;", which still contains "Tom &".
        for title in ["Tom &", "a <", "x & y <z"] {
            let items = vec![item(&escaping, title, "Comedy")];
            assert!(run(&items, &teaser()).is_empty(), "{title}");
        }

        let raw = Mapper::new(MigrationConfig::default());
        let items = vec![item(&raw, "Tom &", "Comedy")];
        assert_eq!(codes(&run(&items, &teaser())), vec!["MARKUP_IN_TEXT"]);
    }
}
