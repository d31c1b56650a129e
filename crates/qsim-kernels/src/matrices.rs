//! Dense matrices for every catalog gate and generator
//!
//! Matrices are row-major `2^k x 2^k` over the operation's local wires, with
//! the first wire as the most significant local bit. For controlled gates the
//! leading wires are the controls.

use num_complex::Complex;
use qsim_dispatch::{GateOperation, GeneratorOperation, Precision};

pub type Matrix<T> = Vec<Complex<T>>;

fn cplx<T: Precision>(re: T, im: T) -> Complex<T> {
    Complex::new(re, im)
}

fn one<T: Precision>() -> Complex<T> {
    cplx(T::one(), T::zero())
}

fn zero<T: Precision>() -> Complex<T> {
    cplx(T::zero(), T::zero())
}

fn half<T: Precision>() -> T {
    T::one() / (T::one() + T::one())
}

fn phase<T: Precision>(theta: T) -> Complex<T> {
    Complex::from_polar(T::one(), theta)
}

fn diagonal<T: Precision>(entries: &[Complex<T>]) -> Matrix<T> {
    let dim = entries.len();
    let mut m = vec![zero(); dim * dim];
    for (i, &value) in entries.iter().enumerate() {
        m[i * dim + i] = value;
    }
    m
}

/// Side length of a square row-major matrix.
pub fn dimension<T>(matrix: &[Complex<T>]) -> usize {
    (matrix.len() as f64).sqrt().round() as usize
}

/// Conjugate transpose.
pub fn adjoint<T: Precision>(matrix: &[Complex<T>]) -> Matrix<T> {
    let dim = dimension(matrix);
    let mut out = vec![zero(); matrix.len()];
    for r in 0..dim {
        for c in 0..dim {
            out[c * dim + r] = matrix[r * dim + c].conj();
        }
    }
    out
}

/// Kronecker product `a ⊗ b`.
pub fn kron<T: Precision>(a: &[Complex<T>], b: &[Complex<T>]) -> Matrix<T> {
    let (da, db) = (dimension(a), dimension(b));
    let dim = da * db;
    let mut out = vec![zero(); dim * dim];
    for ar in 0..da {
        for ac in 0..da {
            let scale = a[ar * da + ac];
            for br in 0..db {
                for bc in 0..db {
                    out[(ar * db + br) * dim + ac * db + bc] = scale * b[br * db + bc];
                }
            }
        }
    }
    out
}

/// `|0⟩⟨0| ⊗ I + |1⟩⟨1| ⊗ u`, with the control as the leading wire.
fn controlled<T: Precision>(u: &[Complex<T>]) -> Matrix<T> {
    with_control_block(u, one())
}

/// `|1⟩⟨1| ⊗ u`.
fn projected<T: Precision>(u: &[Complex<T>]) -> Matrix<T> {
    with_control_block(u, zero())
}

fn with_control_block<T: Precision>(u: &[Complex<T>], idle: Complex<T>) -> Matrix<T> {
    let d = dimension(u);
    let dim = 2 * d;
    let mut out = vec![zero(); dim * dim];
    for i in 0..d {
        out[i * dim + i] = idle;
    }
    for r in 0..d {
        for c in 0..d {
            out[(d + r) * dim + d + c] = u[r * d + c];
        }
    }
    out
}

fn pauli_x<T: Precision>() -> Matrix<T> {
    vec![zero(), one(), one(), zero()]
}

fn pauli_y<T: Precision>() -> Matrix<T> {
    vec![zero(), cplx(T::zero(), -T::one()), cplx(T::zero(), T::one()), zero()]
}

fn pauli_z<T: Precision>() -> Matrix<T> {
    diagonal(&[one(), -one::<T>()])
}

fn swap<T: Precision>() -> Matrix<T> {
    let mut m = vec![zero(); 16];
    m[0] = one();
    m[6] = one();
    m[9] = one();
    m[15] = one();
    m
}

fn rx<T: Precision>(theta: T) -> Matrix<T> {
    let (s, c) = (theta * half()).sin_cos();
    vec![cplx(c, T::zero()), cplx(T::zero(), -s), cplx(T::zero(), -s), cplx(c, T::zero())]
}

fn ry<T: Precision>(theta: T) -> Matrix<T> {
    let (s, c) = (theta * half()).sin_cos();
    vec![cplx(c, T::zero()), cplx(-s, T::zero()), cplx(s, T::zero()), cplx(c, T::zero())]
}

fn rz<T: Precision>(theta: T) -> Matrix<T> {
    let h = theta * half();
    diagonal(&[phase(-h), phase(h)])
}

fn phase_shift<T: Precision>(phi: T) -> Matrix<T> {
    diagonal(&[one(), phase(phi)])
}

fn rot<T: Precision>(phi: T, theta: T, omega: T) -> Matrix<T> {
    let (s, c) = (theta * half()).sin_cos();
    let sum = (phi + omega) * half();
    let diff = (phi - omega) * half();
    vec![
        phase(-sum) * c,
        -phase(diff) * s,
        phase(-diff) * s,
        phase(sum) * c,
    ]
}

/// `cos(θ/2) I - i sin(θ/2) P` for a two-qubit Pauli product `P`.
fn ising<T: Precision>(theta: T, pauli: &[Complex<T>]) -> Matrix<T> {
    let (s, c) = (theta * half()).sin_cos();
    let ident = diagonal(&[one(); 4]);
    ident
        .iter()
        .zip(pauli)
        .map(|(&i, &p)| i * c + p * cplx(T::zero(), -s))
        .collect()
}

/// Eigenvalue of `Z ⊗ ... ⊗ Z` on basis state `index`.
fn parity_sign<T: Precision>(index: usize) -> T {
    if index.count_ones() % 2 == 0 {
        T::one()
    } else {
        -T::one()
    }
}

fn multi_rz<T: Precision>(theta: T, num_wires: usize) -> Matrix<T> {
    let h = theta * half();
    let entries: Vec<_> = (0..1usize << num_wires)
        .map(|i| phase(-h * parity_sign::<T>(i)))
        .collect();
    diagonal(&entries)
}

/// The unitary of `op` on `num_wires` wires.
///
/// Callers validate wire and parameter counts first.
pub fn gate_matrix<T: Precision>(op: GateOperation, num_wires: usize, params: &[T]) -> Matrix<T> {
    let p = |i: usize| params.get(i).copied().unwrap_or_else(T::zero);
    match op {
        GateOperation::Identity => diagonal(&[one(), one()]),
        GateOperation::PauliX => pauli_x(),
        GateOperation::PauliY => pauli_y(),
        GateOperation::PauliZ => pauli_z(),
        GateOperation::Hadamard => {
            let h = cplx(T::FRAC_1_SQRT_2(), T::zero());
            vec![h, h, h, -h]
        }
        GateOperation::S => diagonal(&[one(), cplx(T::zero(), T::one())]),
        GateOperation::T => diagonal(&[one(), phase(T::FRAC_PI_4())]),
        GateOperation::SX => {
            let (a, b) = (cplx(half(), half()), cplx(half(), -half::<T>()));
            vec![a, b, b, a]
        }
        GateOperation::PhaseShift => phase_shift(p(0)),
        GateOperation::RX => rx(p(0)),
        GateOperation::RY => ry(p(0)),
        GateOperation::RZ => rz(p(0)),
        GateOperation::Rot => rot(p(0), p(1), p(2)),
        GateOperation::CNOT => controlled(&pauli_x()),
        GateOperation::CY => controlled(&pauli_y()),
        GateOperation::CZ => controlled(&pauli_z()),
        GateOperation::SWAP => swap(),
        GateOperation::IsingXX => ising(p(0), &kron(&pauli_x(), &pauli_x())),
        GateOperation::IsingYY => ising(p(0), &kron(&pauli_y(), &pauli_y())),
        GateOperation::IsingZZ => ising(p(0), &kron(&pauli_z(), &pauli_z())),
        GateOperation::ControlledPhaseShift => controlled(&phase_shift(p(0))),
        GateOperation::CRX => controlled(&rx(p(0))),
        GateOperation::CRY => controlled(&ry(p(0))),
        GateOperation::CRZ => controlled(&rz(p(0))),
        GateOperation::Toffoli => controlled(&controlled(&pauli_x())),
        GateOperation::CSWAP => controlled(&swap()),
        GateOperation::MultiRZ => multi_rz(p(0), num_wires),
    }
}

/// The generator `G` of `op` and its scale `s`, so that
/// `U(θ) = exp(i s θ G)` for the matching gate.
pub fn generator_matrix<T: Precision>(op: GeneratorOperation, num_wires: usize) -> (Matrix<T>, T) {
    let rotation = -half::<T>();
    match op {
        GeneratorOperation::PhaseShift => (diagonal(&[zero(), one()]), T::one()),
        GeneratorOperation::RX => (pauli_x(), rotation),
        GeneratorOperation::RY => (pauli_y(), rotation),
        GeneratorOperation::RZ => (pauli_z(), rotation),
        GeneratorOperation::IsingXX => (kron(&pauli_x(), &pauli_x()), rotation),
        GeneratorOperation::IsingYY => (kron(&pauli_y(), &pauli_y()), rotation),
        GeneratorOperation::IsingZZ => (kron(&pauli_z(), &pauli_z()), rotation),
        GeneratorOperation::ControlledPhaseShift => (diagonal(&[zero(), zero(), zero(), one()]), T::one()),
        GeneratorOperation::CRX => (projected(&pauli_x()), rotation),
        GeneratorOperation::CRY => (projected(&pauli_y()), rotation),
        GeneratorOperation::CRZ => (projected(&pauli_z()), rotation),
        GeneratorOperation::MultiRZ => {
            let entries: Vec<_> = (0..1usize << num_wires)
                .map(|i| cplx(parity_sign::<T>(i), T::zero()))
                .collect();
            (diagonal(&entries), rotation)
        }
    }
}
