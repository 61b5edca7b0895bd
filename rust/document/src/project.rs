// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A host document plus the documents linked into it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::Result;

/// The document markers are placed in, and its linked companions (typically
/// the MEP model carrying ducts and pipes).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub host: Document,
    #[serde(default)]
    pub links: Vec<Document>,
}

impl Project {
    pub fn from_json(json: &str) -> Result<Self> {
        let project: Project = serde_json::from_str(json)?;
        project.host.validate()?;
        for link in &project.links {
            link.validate()?;
        }
        Ok(project)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let project = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            host = %project.host.title,
            links = project.links.len(),
            "Loaded project"
        );
        Ok(project)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Linked document whose title is exactly `title`.
    pub fn link(&self, title: &str) -> Option<&Document> {
        self.links.iter().find(|d| d.title == title)
    }

    /// Borrows the host mutably and the companion `title` immutably, the
    /// shape [`PlacementCommand::run`] takes them in.
    ///
    /// [`PlacementCommand::run`]: hole_placer_core::PlacementCommand::run
    pub fn split_for_run(
        &mut self,
        title: &str,
    ) -> hole_placer_core::Result<(&mut Document, &Document)> {
        let companion = self
            .links
            .iter()
            .find(|d| d.title == title)
            .ok_or_else(|| hole_placer_core::Error::CompanionDocumentNotFound(title.to_string()))?;
        Ok((&mut self.host, companion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use hole_placer_core::ElementId;

    const MINIMAL: &str = r#"{
        "host": { "title": "AR", "levels": [{ "id": 1, "name": "L1" }] },
        "links": [{ "title": "MEP" }, { "title": "MEP-old" }]
    }"#;

    #[test]
    fn parses_with_defaults() {
        let project = Project::from_json(MINIMAL).unwrap();
        assert_eq!(project.host.title, "AR");
        assert_eq!(project.host.levels[0].elevation, 0.0);
        assert!(project.host.walls.is_empty());
        assert_eq!(project.links.len(), 2);
    }

    #[test]
    fn companion_requires_exact_title() {
        let mut project = Project::from_json(MINIMAL).unwrap();
        let (_, companion) = project.split_for_run("MEP").unwrap();
        assert_eq!(companion.title, "MEP");

        let err = project.split_for_run("mep").unwrap_err();
        assert!(matches!(err, hole_placer_core::Error::CompanionDocumentNotFound(t) if t == "mep"));
    }

    #[test]
    fn duplicate_ids_fail_loading() {
        let json = r#"{
            "host": {
                "title": "AR",
                "levels": [{ "id": 1, "name": "L1" }],
                "views": [{ "id": 1, "name": "{3D}", "kind": "three_d" }]
            }
        }"#;
        let err = Project::from_json(json).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { id, .. } if id == ElementId(1)));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(Project::from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn json_round_trip_keeps_instances() {
        let mut project = Project::from_json(MINIMAL).unwrap();
        project.host.instances.push(crate::schema::InstanceRecord {
            id: ElementId(9),
            symbol: hole_placer_core::SymbolId(ElementId(5)),
            host: ElementId(2),
            level: ElementId(1),
            point: [1.0, 2.0, 3.0],
            parameters: [("Width".to_string(), 0.2)].into_iter().collect(),
        });

        let json = project.to_json_pretty().unwrap();
        let back = Project::from_json(&json).unwrap();
        assert_eq!(back.host.instances, project.host.instances);
    }
}
