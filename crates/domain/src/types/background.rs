define_vocabulary! {
    /// Character background.
    Background, "background" {
        Acolyte => "Acolyte",
        Criminal => "Criminal",
        FolkHero => "Folk Hero",
        Noble => "Noble",
        Sage => "Sage",
        Soldier => "Soldier",
    }
}
