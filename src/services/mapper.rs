use crate::error::Result;
use crate::model::config::MigrationConfig;
use crate::model::item::{
    AssetElement, CodenameRef, ItemSystem, MigrationItem, MovieElements, MultipleChoiceElement,
    NumberElement, RichTextElement, RichTextValue, TextElement,
};
use crate::model::record::SourceRecord;
use crate::services::{codename, rich_text, vocabulary::Vocabulary};

/// Turns source records into migration items for one configuration.
///
/// Holds only read-only state, so a single mapper can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct Mapper {
    config: MigrationConfig,
    languages: Vocabulary,
}

impl Mapper {
    pub fn new(config: MigrationConfig) -> Self {
        let languages = Vocabulary::new("language", config.languages.clone());
        Mapper { config, languages }
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    pub fn translate_language(&self, label: &str) -> Result<&str> {
        self.languages.translate(label)
    }

    pub fn map_record(&self, raw: &SourceRecord) -> Result<MigrationItem> {
        let language = self.translate_language(&raw.language)?;

        let system = ItemSystem {
            name: raw.title.clone(),
            codename: codename::to_codename(&raw.title),
            collection: CodenameRef::new(&self.config.collection),
            language: CodenameRef::new(language),
            content_type: CodenameRef::new(&self.config.content_type),
            workflow: CodenameRef::new(&self.config.workflow),
            workflow_step: CodenameRef::new(&self.config.workflow_step),
        };

        let elements = MovieElements {
            title: TextElement {
                value: raw.title.clone(),
            },
            length: NumberElement {
                value: raw.duration,
            },
            category: MultipleChoiceElement {
                value: split_categories(&raw.genre),
            },
            poster: AssetElement {
                value: vec![CodenameRef::new(&self.config.poster_asset)],
            },
            plot: RichTextElement {
                value: RichTextValue {
                    value: rich_text::plot_html(&raw.title, &raw.text, self.config.escape_html),
                    components: Vec::new(),
                },
            },
        };

        Ok(MigrationItem { system, elements })
    }
}

/// Split comma-separated genres and trim each piece.
///
/// Pieces are taken as codenames verbatim: no case change, no stripping,
/// duplicates and empty pieces kept.
pub fn split_categories(genre: &str) -> Vec<CodenameRef> {
    genre
        .split(',')
        .map(|piece| CodenameRef::new(piece.trim()))
        .collect()
}
