//! Torpedo store capability.
//!
//! Контроллер видит store только через этот trait: "пуст ли?" и "выстрели N".
//! Внутренний счётчик торпед принадлежит store, контроллер его не трогает.

pub mod bay;


pub use bay::TorpedoBay;

/// Ammunition store (primary или secondary bay корабля)
///
/// Failure сигнализируется только через `false` из `fire`, никаких panic/Result.
pub trait TorpedoStore {
    /// Store исчерпан (запрос без side effects)
    fn is_empty(&self) -> bool;

    /// Попытка выпустить `count` торпед. `true` = торпеды покинули аппарат.
    fn fire(&mut self, count: u32) -> bool;
}

impl<T: TorpedoStore + ?Sized> TorpedoStore for &mut T {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn fire(&mut self, count: u32) -> bool {
        (**self).fire(count)
    }
}

impl<T: TorpedoStore + ?Sized> TorpedoStore for Box<T> {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn fire(&mut self, count: u32) -> bool {
        (**self).fire(count)
    }
}
