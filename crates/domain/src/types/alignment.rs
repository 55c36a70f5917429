define_vocabulary! {
    /// Moral and ethical alignment.
    Alignment, "alignment" {
        LawfulGood => "Lawful Good",
        NeutralGood => "Neutral Good",
        ChaoticGood => "Chaotic Good",
        LawfulNeutral => "Lawful Neutral",
        TrueNeutral => "True Neutral",
        ChaoticNeutral => "Chaotic Neutral",
        LawfulEvil => "Lawful Evil",
        NeutralEvil => "Neutral Evil",
        ChaoticEvil => "Chaotic Evil",
    }
}
