// src/random.rs
//! Источник случайности
//!
//! Вся случайность генератора проходит через [`RandomSource`], который явно передаётся
//! в каждую функцию. Любой `rand::Rng` подходит напрямую, а для воспроизводимых запусков
//! используется `ChaCha8Rng` с фиксированным сидом.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Равномерное число из `[0, 1)`
    fn unit(&mut self) -> f64;

    /// Равномерный индекс из `0..len`; `len` должен быть больше нуля
    fn index(&mut self, len: usize) -> usize;

    /// Равномерное число из `[low, high]`
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.unit()
    }

    /// Равномерное целое из `low..=high`
    fn int_inclusive(&mut self, low: i64, high: i64) -> i64 {
        low + self.index((high - low + 1) as usize) as i64
    }

    /// Равномерный выбор элемента непустого среза
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T
    where
        Self: Sized,
    {
        &items[self.index(items.len())]
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn unit(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }

    fn index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Генератор для одного запуска: детерминированный при заданном сиде
#[must_use]
pub fn run_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
