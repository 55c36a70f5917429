define_vocabulary! {
    /// One of the six ability scores. The wire form is the lower-case key
    /// used in ability score objects.
    Ability, "ability" {
        Strength => "strength",
        Dexterity => "dexterity",
        Constitution => "constitution",
        Intelligence => "intelligence",
        Wisdom => "wisdom",
        Charisma => "charisma",
    }
}

impl Ability {
    pub fn label(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }
}
