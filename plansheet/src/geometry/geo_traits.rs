/// Trait for detecting collisions between `self` and an entity of type `T`.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}
