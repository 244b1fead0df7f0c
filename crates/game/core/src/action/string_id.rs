/// Opaque message identifier resolved to text by a localization layer.
///
/// Results carry these instead of strings; [`StringId::key`] gives the stable
/// lookup key.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u16)]
#[non_exhaustive]
pub enum StringId {
    #[default]
    None = 0,
    CantRemoveThis,
    LandNotOwnedByPark,
    CantDoThis,
    CantChangeGroupThatTheHostBelongsTo,
    CantSetToThisGroup,
    TooManyBannersInGame,
    CantLowerElementHere,
    CantRaiseElementHere,
    NotEnoughCashRequires,
    ConstructionNotPossibleWhileGameIsPaused,
    PermissionDenied,
    EditorOnly,
}

impl StringId {
    /// Stable localization key, e.g. `cant_remove_this`.
    pub fn key(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_snake_case() {
        assert_eq!(StringId::CantRemoveThis.key(), "cant_remove_this");
        assert_eq!(
            StringId::CantChangeGroupThatTheHostBelongsTo.key(),
            "cant_change_group_that_the_host_belongs_to"
        );
        assert_eq!(StringId::from_repr(2), Some(StringId::LandNotOwnedByPark));
    }
}
