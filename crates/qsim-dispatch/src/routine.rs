//! Callable contracts of the three routine families
//!
//! A routine mutates a borrowed state vector of `2^num_qubits` amplitudes in
//! place. It never keeps the borrow beyond the call. Routines validate the
//! arguments specific to their operation (wire count, parameter count, wire
//! range) and report failures as [`RoutineError`].
//!
//! Closures and fn items with the matching signature implement the traits
//! directly. The [`gate_fn`], [`generator_fn`] and [`matrix_fn`] helpers pin
//! a closure's argument types so they need no annotations.

use num_complex::Complex;

use crate::error::RoutineError;
use crate::precision::Precision;

pub type RoutineResult<R> = std::result::Result<R, RoutineError>;

/// Applies one named gate.
pub trait GateRoutine<T: Precision>: Send + Sync {
    fn apply(
        &self,
        state: &mut [Complex<T>],
        num_qubits: usize,
        wires: &[usize],
        inverse: bool,
        params: &[T],
    ) -> RoutineResult<()>;
}

/// Applies a generator and returns its scale factor.
pub trait GeneratorRoutine<T: Precision>: Send + Sync {
    fn apply(&self, state: &mut [Complex<T>], num_qubits: usize, wires: &[usize], adjoint: bool) -> RoutineResult<T>;
}

/// Applies a row-major `2^k x 2^k` matrix to `k` wires.
///
/// The dispatcher has already checked that `matrix.len() == 4^wires.len()`.
pub trait MatrixRoutine<T: Precision>: Send + Sync {
    fn apply(
        &self,
        state: &mut [Complex<T>],
        num_qubits: usize,
        matrix: &[Complex<T>],
        wires: &[usize],
        inverse: bool,
    ) -> RoutineResult<()>;
}

impl<T, F> GateRoutine<T> for F
where
    T: Precision,
    F: Fn(&mut [Complex<T>], usize, &[usize], bool, &[T]) -> RoutineResult<()> + Send + Sync,
{
    fn apply(
        &self,
        state: &mut [Complex<T>],
        num_qubits: usize,
        wires: &[usize],
        inverse: bool,
        params: &[T],
    ) -> RoutineResult<()> {
        self(state, num_qubits, wires, inverse, params)
    }
}

impl<T, F> GeneratorRoutine<T> for F
where
    T: Precision,
    F: Fn(&mut [Complex<T>], usize, &[usize], bool) -> RoutineResult<T> + Send + Sync,
{
    fn apply(&self, state: &mut [Complex<T>], num_qubits: usize, wires: &[usize], adjoint: bool) -> RoutineResult<T> {
        self(state, num_qubits, wires, adjoint)
    }
}

impl<T, F> MatrixRoutine<T> for F
where
    T: Precision,
    F: Fn(&mut [Complex<T>], usize, &[Complex<T>], &[usize], bool) -> RoutineResult<()> + Send + Sync,
{
    fn apply(
        &self,
        state: &mut [Complex<T>],
        num_qubits: usize,
        matrix: &[Complex<T>],
        wires: &[usize],
        inverse: bool,
    ) -> RoutineResult<()> {
        self(state, num_qubits, matrix, wires, inverse)
    }
}

pub fn gate_fn<T, F>(f: F) -> F
where
    T: Precision,
    F: Fn(&mut [Complex<T>], usize, &[usize], bool, &[T]) -> RoutineResult<()> + Send + Sync,
{
    f
}

pub fn generator_fn<T, F>(f: F) -> F
where
    T: Precision,
    F: Fn(&mut [Complex<T>], usize, &[usize], bool) -> RoutineResult<T> + Send + Sync,
{
    f
}

pub fn matrix_fn<T, F>(f: F) -> F
where
    T: Precision,
    F: Fn(&mut [Complex<T>], usize, &[Complex<T>], &[usize], bool) -> RoutineResult<()> + Send + Sync,
{
    f
}
