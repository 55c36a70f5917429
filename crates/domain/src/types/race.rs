//! Playable races and the race → subrace lookup table.

define_vocabulary! {
    /// A playable race.
    Race, "race" {
        Human => "Human",
        Elf => "Elf",
        Dwarf => "Dwarf",
        Halfling => "Halfling",
        Dragonborn => "Dragonborn",
        Gnome => "Gnome",
        HalfElf => "Half-Elf",
        HalfOrc => "Half-Orc",
        Tiefling => "Tiefling",
    }
}

impl Race {
    /// Subraces that may be chosen for this race.
    ///
    /// Only Elf, Dwarf, Halfling and Gnome have subraces; every other race
    /// returns an empty slice.
    pub fn subraces(&self) -> &'static [&'static str] {
        match self {
            Race::Elf => &["High Elf", "Wood Elf", "Dark Elf"],
            Race::Dwarf => &["Hill Dwarf", "Mountain Dwarf"],
            Race::Halfling => &["Lightfoot", "Stout"],
            Race::Gnome => &["Forest Gnome", "Rock Gnome"],
            Race::Human
            | Race::Dragonborn
            | Race::HalfElf
            | Race::HalfOrc
            | Race::Tiefling => &[],
        }
    }

    pub fn has_subrace(&self, subrace: &str) -> bool {
        self.subraces().contains(&subrace)
    }
}
