define_vocabulary! {
    /// A character class.
    CharacterClass, "class" {
        Fighter => "Fighter",
        Wizard => "Wizard",
        Rogue => "Rogue",
        Cleric => "Cleric",
        Barbarian => "Barbarian",
        Bard => "Bard",
        Druid => "Druid",
        Monk => "Monk",
        Paladin => "Paladin",
        Ranger => "Ranger",
        Sorcerer => "Sorcerer",
        Warlock => "Warlock",
    }
}

impl CharacterClass {
    /// Subclasses offered in the class picker.
    ///
    /// Suggestions only: subclass is free-form and never checked against
    /// this list during validation.
    pub fn subclass_options(&self) -> &'static [&'static str] {
        match self {
            CharacterClass::Fighter => &["Champion", "Battle Master", "Eldritch Knight"],
            CharacterClass::Wizard => &[
                "School of Abjuration",
                "School of Conjuration",
                "School of Divination",
            ],
            CharacterClass::Rogue => &["Thief", "Assassin", "Arcane Trickster"],
            CharacterClass::Cleric => &["Knowledge Domain", "Life Domain", "Light Domain"],
            CharacterClass::Barbarian => &["Path of the Berserker", "Path of the Totem Warrior"],
            CharacterClass::Bard => &["College of Lore", "College of Valor"],
            CharacterClass::Druid => &["Circle of the Land", "Circle of the Moon"],
            CharacterClass::Monk => &["Way of the Open Hand", "Way of Shadow"],
            CharacterClass::Paladin => &["Oath of Devotion", "Oath of the Ancients"],
            CharacterClass::Ranger => &["Hunter", "Beast Master"],
            CharacterClass::Sorcerer => &["Draconic Bloodline", "Wild Magic"],
            CharacterClass::Warlock => &["The Fiend", "The Great Old One"],
        }
    }
}
