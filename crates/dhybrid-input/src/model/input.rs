//! The complete input deck.

use serde::{Deserialize, Serialize};

use crate::codec::InputError;
use crate::model::section::Section;
use crate::model::sections::{
    Algorithm, BoundaryConditions, DiagSpecies, DiagSpeciesTotal, ExtEmf, FieldDiag, GlobalOutput,
    GridSpace, LoadBalance, NodeConf, Particles, RawDiag, Restart, Species, Time, TrackDiag,
};
use crate::schema::Value;

/// Number of sections in a deck.
pub const SECTION_COUNT: usize = 16;

/// Section names in canonical output order.
pub const SECTION_NAMES: [&str; SECTION_COUNT] = [
    NodeConf::NAME,
    Time::NAME,
    GridSpace::NAME,
    GlobalOutput::NAME,
    Restart::NAME,
    ExtEmf::NAME,
    FieldDiag::NAME,
    Algorithm::NAME,
    LoadBalance::NAME,
    Particles::NAME,
    Species::NAME,
    BoundaryConditions::NAME,
    DiagSpecies::NAME,
    RawDiag::NAME,
    TrackDiag::NAME,
    DiagSpeciesTotal::NAME,
];

/// A full dHybrid input deck: sixteen sections in canonical order.
///
/// This is a plain value.  Build it from defaults and override what you need,
/// or read it with [`DHybridInput::from_file`]; write it with
/// [`DHybridInput::to_file`] or format it with `to_string()`.
///
/// # Example
///
/// ```rust
/// use dhybrid_input::{DHybridInput, Time, Value};
///
/// let mut deck = DHybridInput {
///     time: Time { niter: 1000, ..Default::default() },
///     ..Default::default()
/// };
/// deck.set("species", "name", Value::Str("He++".into())).unwrap();
///
/// assert_eq!(deck.get("time", "niter"), Some(Value::Int(1000)));
/// assert_eq!(deck.species.name, "He++");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DHybridInput {
    pub node_conf: NodeConf,
    pub time: Time,
    pub grid_space: GridSpace,
    pub global_output: GlobalOutput,
    pub restart: Restart,
    pub ext_emf: ExtEmf,
    pub field_diag: FieldDiag,
    pub algorithm: Algorithm,
    pub loadbalance: LoadBalance,
    pub particles: Particles,
    pub species: Species,
    pub boundary_conditions: BoundaryConditions,
    pub diag_species: DiagSpecies,
    pub raw_diag: RawDiag,
    pub track_diag: TrackDiag,
    pub diag_species_total: DiagSpeciesTotal,
}

impl DHybridInput {
    /// Creates a deck with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// All sections in canonical order.
    pub fn sections(&self) -> [&dyn Section; SECTION_COUNT] {
        [
            &self.node_conf,
            &self.time,
            &self.grid_space,
            &self.global_output,
            &self.restart,
            &self.ext_emf,
            &self.field_diag,
            &self.algorithm,
            &self.loadbalance,
            &self.particles,
            &self.species,
            &self.boundary_conditions,
            &self.diag_species,
            &self.raw_diag,
            &self.track_diag,
            &self.diag_species_total,
        ]
    }

    /// All sections in canonical order, mutably.
    pub fn sections_mut(&mut self) -> [&mut dyn Section; SECTION_COUNT] {
        [
            &mut self.node_conf,
            &mut self.time,
            &mut self.grid_space,
            &mut self.global_output,
            &mut self.restart,
            &mut self.ext_emf,
            &mut self.field_diag,
            &mut self.algorithm,
            &mut self.loadbalance,
            &mut self.particles,
            &mut self.species,
            &mut self.boundary_conditions,
            &mut self.diag_species,
            &mut self.raw_diag,
            &mut self.track_diag,
            &mut self.diag_species_total,
        ]
    }

    /// Looks up a section by its deck name.
    pub fn section(&self, name: &str) -> Option<&dyn Section> {
        self.sections().into_iter().find(|s| s.name() == name)
    }

    /// Looks up a section by its deck name, mutably.
    pub fn section_mut(&mut self, name: &str) -> Option<&mut dyn Section> {
        self.sections_mut().into_iter().find(|s| s.name() == name)
    }

    /// Reads `section.field` as a dynamic value.
    pub fn get(&self, section: &str, field: &str) -> Option<Value> {
        self.section(section)?.get(field)
    }

    /// Assigns `section.field` from a dynamic value.
    ///
    /// # Errors
    ///
    /// [`InputError::UnknownSection`] for a name outside the schema, otherwise
    /// whatever [`Section::set`] returns.
    pub fn set(&mut self, section: &str, field: &str, value: Value) -> Result<(), InputError> {
        self.section_mut(section)
            .ok_or_else(|| InputError::UnknownSection {
                section: section.to_string(),
            })?
            .set(field, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_follow_canonical_order() {
        let deck = DHybridInput::new();
        let names: Vec<&str> = deck.sections().iter().map(|s| s.name()).collect();
        assert_eq!(names, SECTION_NAMES);
    }

    #[test]
    fn test_section_names_are_unique() {
        let mut names = SECTION_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SECTION_COUNT);
    }

    #[test]
    fn test_get_reads_default_values() {
        let deck = DHybridInput::new();
        assert_eq!(deck.get("time", "dt"), Some(Value::Float(0.002)));
        assert_eq!(
            deck.get("global_output", "units"),
            Some(Value::Str("NORM".into()))
        );
        assert_eq!(deck.get("time", "nope"), None);
        assert_eq!(deck.get("nope", "dt"), None);
    }

    #[test]
    fn test_set_routes_to_named_section() {
        // Arrange
        let mut deck = DHybridInput::new();

        // Act
        deck.set("boundary_conditions", "vth", Value::Float(0.5)).unwrap();

        // Assert
        assert_eq!(deck.boundary_conditions.vth, 0.5);
        // `species.vth` shares the key but is a different field.
        assert_eq!(deck.species.vth, 0.1);
    }

    #[test]
    fn test_set_unknown_section_is_rejected() {
        let mut deck = DHybridInput::new();
        let err = deck.set("nonsense", "dt", Value::Float(1.0)).unwrap_err();
        assert!(matches!(err, InputError::UnknownSection { ref section } if section == "nonsense"));
    }

    #[test]
    fn test_default_deck_matches_reference_setup() {
        let deck = DHybridInput::default();
        assert_eq!(deck.node_conf.node_number, vec![16, 16]);
        assert_eq!(deck.grid_space.ncells, vec![1024, 1024]);
        assert_eq!(deck.field_diag.dmp_efld, vec![false, false, true, true]);
        assert_eq!(deck.diag_species.phasespaces.len(), 5);
        assert_eq!(deck.track_diag.track_info_file, "./input/H+.tags");
    }

    // ── serde ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_deck_serializes_and_deserializes_through_toml() {
        // Arrange
        let mut deck = DHybridInput::default();
        deck.time.niter = 42;
        deck.grid_space.te = 0.5;

        // Act
        let toml_str = toml::to_string_pretty(&deck).expect("serialize");
        let restored: DHybridInput = toml::from_str(&toml_str).expect("deserialize");

        // Assert
        assert_eq!(deck, restored);
        assert!(toml_str.contains("Te = 0.5"), "deck keys are used: {toml_str}");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[time]
niter = 7
"#;
        let deck: DHybridInput = toml::from_str(toml_str).expect("deserialize partial");
        assert_eq!(deck.time.niter, 7);
        assert_eq!(deck.time.dt, 0.002);
        assert_eq!(deck.species, Species::default());
    }
}
