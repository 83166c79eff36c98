use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RoiError;
use crate::estimate::OrgProfile;
use crate::projection::engine::{check_bounds, project, ProjectionAssumptions};
use crate::projection::roi::ProjectionResult;
use crate::RoiResult;

/// Version tag written into every exported document.
pub const SCENARIO_FORMAT_VERSION: &str = "1.0";

fn current_format_version() -> String {
    SCENARIO_FORMAT_VERSION.to_string()
}

/// A named set of assumptions together with the projection computed from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedScenario {
    pub name: String,
    #[serde(default)]
    pub profile: OrgProfile,
    pub assumptions: ProjectionAssumptions,
    pub projection: ProjectionResult,
    pub saved_at: DateTime<Utc>,
}

impl SavedScenario {
    /// Project `assumptions` and stamp the result with `saved_at`.
    /// Assumptions outside the engine's input bounds are rejected.
    pub fn new(
        name: impl Into<String>,
        profile: OrgProfile,
        assumptions: ProjectionAssumptions,
        saved_at: DateTime<Utc>,
    ) -> RoiResult<Self> {
        check_bounds(&assumptions)?;
        let projection = project(&assumptions);
        Ok(SavedScenario {
            name: name.into(),
            profile,
            assumptions,
            projection,
            saved_at,
        })
    }

    /// Same as `new`, stamped with the current time.
    pub fn capture(
        name: impl Into<String>,
        profile: OrgProfile,
        assumptions: ProjectionAssumptions,
    ) -> RoiResult<Self> {
        Self::new(name, profile, assumptions, Utc::now())
    }

    /// Bounds check for scenarios that arrive already built, e.g. from a file.
    pub fn check(&self) -> RoiResult<()> {
        check_bounds(&self.assumptions)
    }

    /// True when the assumptions are in bounds and the stored projection
    /// still matches them.
    pub fn is_consistent(&self) -> bool {
        self.check().is_ok() && project(&self.assumptions) == self.projection
    }
}

/// Export format for a single scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDocument {
    pub format_version: String,
    pub scenario: SavedScenario,
}

/// Ordered, name-keyed collection of saved scenarios. Also the export
/// format for a whole library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioLibrary {
    #[serde(default = "current_format_version")]
    pub format_version: String,
    #[serde(default)]
    pub scenarios: Vec<SavedScenario>,
}

impl Default for ScenarioLibrary {
    fn default() -> Self {
        ScenarioLibrary {
            format_version: current_format_version(),
            scenarios: Vec::new(),
        }
    }
}

fn check_version(found: &str) -> RoiResult<()> {
    if found != SCENARIO_FORMAT_VERSION {
        return Err(RoiError::UnsupportedFormatVersion {
            found: found.to_string(),
            expected: SCENARIO_FORMAT_VERSION.to_string(),
        });
    }
    Ok(())
}

impl ScenarioLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name.as_str()).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.scenarios.iter().position(|s| s.name == name)
    }

    /// Insert or overwrite by name. Returns true when an existing scenario
    /// was replaced; a replaced scenario keeps its position.
    pub fn save(&mut self, scenario: SavedScenario) -> bool {
        match self.position(&scenario.name) {
            Some(idx) => {
                log::info!("replacing scenario '{}'", scenario.name);
                self.scenarios[idx] = scenario;
                true
            }
            None => {
                log::info!("saving scenario '{}'", scenario.name);
                self.scenarios.push(scenario);
                false
            }
        }
    }

    pub fn load(&self, name: &str) -> RoiResult<&SavedScenario> {
        self.scenarios
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RoiError::ScenarioNotFound(name.to_string()))
    }

    pub fn delete(&mut self, name: &str) -> RoiResult<SavedScenario> {
        let idx = self
            .position(name)
            .ok_or_else(|| RoiError::ScenarioNotFound(name.to_string()))?;
        log::info!("deleting scenario '{name}'");
        Ok(self.scenarios.remove(idx))
    }

    /// Serialise one scenario as a versioned JSON document.
    pub fn export_scenario_json(&self, name: &str) -> RoiResult<String> {
        let doc = ScenarioDocument {
            format_version: current_format_version(),
            scenario: self.load(name)?.clone(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Add a scenario from an exported document, optionally under a new name.
    /// Refuses to overwrite unless `overwrite` is set.
    pub fn import_scenario_json(
        &mut self,
        json: &str,
        rename: Option<&str>,
        overwrite: bool,
    ) -> RoiResult<&SavedScenario> {
        let doc: ScenarioDocument = serde_json::from_str(json)?;
        check_version(&doc.format_version)?;

        let mut scenario = doc.scenario;
        scenario.check()?;
        if let Some(new_name) = rename {
            scenario.name = new_name.to_string();
        }
        if !overwrite && self.position(&scenario.name).is_some() {
            return Err(RoiError::DuplicateScenario(scenario.name));
        }
        if !scenario.is_consistent() {
            log::warn!(
                "imported scenario '{}' has a stored projection that differs from its assumptions",
                scenario.name
            );
        }

        let name = scenario.name.clone();
        self.save(scenario);
        self.load(&name)
    }

    /// Serialise the whole library.
    pub fn export_json(&self) -> RoiResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a library document, rejecting unknown format versions.
    pub fn from_json(json: &str) -> RoiResult<Self> {
        let library: ScenarioLibrary = serde_json::from_str(json)?;
        check_version(&library.format_version)?;
        for scenario in &library.scenarios {
            scenario.check()?;
        }
        Ok(library)
    }

    /// Merge every scenario from another library document into this one.
    /// Returns the number of scenarios imported.
    pub fn import_json(&mut self, json: &str, overwrite: bool) -> RoiResult<usize> {
        let incoming = Self::from_json(json)?;
        if !overwrite {
            if let Some(dup) = incoming
                .scenarios
                .iter()
                .find(|s| self.position(&s.name).is_some())
            {
                return Err(RoiError::DuplicateScenario(dup.name.clone()));
            }
        }
        let count = incoming.scenarios.len();
        for scenario in incoming.scenarios {
            self.save(scenario);
        }
        Ok(count)
    }
}
