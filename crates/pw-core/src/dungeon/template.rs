//! Room template lookup
//!
//! Resolves the template identifiers named by a room node into template
//! resources, and builds rooms from them.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{read_json, ConfigError};

use super::room::{Room, RoomTemplate};

/// Source of room templates consumed by placement strategies
pub trait RoomTemplateRepository {
    /// Templates for a set of identifiers, in set order; may be empty
    fn resolve_template_set(&self, set: &[String]) -> Vec<Arc<RoomTemplate>>;

    /// Build a room from a template, or `None` if the template is unusable
    fn instantiate_room(&self, template: &Arc<RoomTemplate>) -> Option<Room> {
        if let Err(err) = template.validate() {
            tracing::warn!("Skipping room template: {}", err);
            return None;
        }
        Some(template.instantiate())
    }
}

impl<R: RoomTemplateRepository + ?Sized> RoomTemplateRepository for &R {
    fn resolve_template_set(&self, set: &[String]) -> Vec<Arc<RoomTemplate>> {
        (**self).resolve_template_set(set)
    }

    fn instantiate_room(&self, template: &Arc<RoomTemplate>) -> Option<Room> {
        (**self).instantiate_room(template)
    }
}

/// In-memory template store keyed by template id
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: HashMap<String, Arc<RoomTemplate>>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template, replacing any previous one with the same id
    pub fn insert(&mut self, template: RoomTemplate) -> Option<Arc<RoomTemplate>> {
        self.templates.insert(template.id.clone(), Arc::new(template))
    }

    pub fn get(&self, id: &str) -> Option<&Arc<RoomTemplate>> {
        self.templates.get(id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Build a library from templates, rejecting any with diagonal slots
    pub fn from_templates(templates: Vec<RoomTemplate>) -> Result<Self, ConfigError> {
        for template in &templates {
            template.validate()?;
        }
        Ok(templates.into_iter().collect())
    }

    /// Load a JSON array of templates
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let templates: Vec<RoomTemplate> = read_json(path.as_ref())?;
        Self::from_templates(templates)
    }

    /// Add every template of `other`, replacing templates with the same id
    pub fn merge(&mut self, other: TemplateLibrary) {
        self.templates.extend(other.templates);
    }
}

impl FromIterator<RoomTemplate> for TemplateLibrary {
    fn from_iter<I: IntoIterator<Item = RoomTemplate>>(iter: I) -> Self {
        let mut library = TemplateLibrary::new();
        for template in iter {
            library.insert(template);
        }
        library
    }
}

impl RoomTemplateRepository for TemplateLibrary {
    fn resolve_template_set(&self, set: &[String]) -> Vec<Arc<RoomTemplate>> {
        set.iter()
            .filter_map(|id| {
                let found = self.templates.get(id).cloned();
                if found.is_none() {
                    tracing::warn!("Unknown room template '{}'", id);
                }
                found
            })
            .collect()
    }
}
