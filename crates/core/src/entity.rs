//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Returns the first identifier that occurs more than once, if any.
pub fn first_duplicate_id<'a, E, I>(entities: I) -> Option<&'a E::Id>
where
    E: Entity + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut seen = std::collections::HashSet::new();
    entities.into_iter().map(Entity::id).find(|id| !seen.insert(*id))
}
