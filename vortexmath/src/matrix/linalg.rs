
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Direct and iterative solvers for dense linear equation systems.

use super::*;

#[derive(Debug, Clone)]
/// General structure for passing in settings to an iterative linear equation solver
pub struct IterativeSolverSettings {
    /// Tolerance for the relative residual at which the solver stops iterating
    pub tolerance: Float,
    /// Maximum number of iterations to perform for the solver
    pub max_iterations: usize,
}

#[derive(Debug, Clone)]
/// Result of an iterative linear equation solve
pub struct IterativeSolution {
    /// The estimated solution vector
    pub x: Vec<Float>,
    /// The number of iterations that were performed
    pub iterations: usize,
    /// The relative residual norm at the last iteration
    pub residual: Float,
    /// Whether the residual reached the tolerance within the iteration budget
    pub converged: bool,
}

fn norm(vector: &[Float]) -> Float {
    vector.iter().map(|value| value * value).sum::<Float>().sqrt()
}

fn dot(a: &[Float], b: &[Float]) -> Float {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

impl Matrix<Float> {
    /// Solves the equation system Ax = b using Gaussian elimination.
    ///
    /// Source: <https://en.wikipedia.org/wiki/Gaussian_elimination>
    pub fn solve_gaussian_elimination(&self, rhs: &[Float]) -> Vec<Float> {
        let n = self.nr_rows();
        let m = self.nr_cols();

        // Check that the matrix is square
        assert_eq!(n, m, "Matrix must be square for Gaussian elimination");
        assert_eq!(rhs.len(), n, "Right-hand side vector length must match matrix size");

        // Create augmented matrix [A|b]
        let mut aug = Matrix::new_default([n, n + 1]);

        // Copy matrix A and vector b into augmented matrix
        for i in 0..n {
            for j in 0..n {
                aug[[i, j]] = self[[i, j]];
            }
            aug[[i, n]] = rhs[i];
        }

        // Forward elimination with partial pivoting
        for k in 0..n {
            // Find the pivot (largest absolute value in column k, from row k onwards)
            let mut max_row = k;
            for i in (k + 1)..n {
                if aug[[i, k]].abs() > aug[[max_row, k]].abs() {
                    max_row = i;
                }
            }

            // Swap rows if needed
            if max_row != k {
                for j in 0..=n {
                    let temp = aug[[k, j]];
                    aug[[k, j]] = aug[[max_row, j]];
                    aug[[max_row, j]] = temp;
                }
            }

            // Check for singular matrix (pivot is effectively zero)
            if aug[[k, k]].abs() < 1e-12 {
                panic!("Matrix is singular or nearly singular");
            }

            // Eliminate column k in rows below k
            for i in (k + 1)..n {
                let factor = aug[[i, k]] / aug[[k, k]];
                for j in k..=n {
                    aug[[i, j]] -= factor * aug[[k, j]];
                }
            }
        }

        // Back substitution
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in (i + 1)..n {
                sum += aug[[i, j]] * x[j];
            }

            x[i] = (aug[[i, n]] - sum) / aug[[i, i]];
        }

        x
    }

    /// Solves the equation system Ax = b using the stabilized bi-conjugate gradient method,
    /// warm-started from the given initial guess.
    ///
    /// Intended for the dense, non-symmetric systems that arise from potential theory influence
    /// coefficients. Convergence is measured on the residual norm relative to the right-hand side
    /// norm. A vanishing right-hand side returns the zero vector immediately. Numerical breakdown
    /// is reported through the `converged` flag rather than a panic, so that callers can treat it
    /// as a recoverable error.
    ///
    /// Source: <https://en.wikipedia.org/wiki/Biconjugate_gradient_stabilized_method>
    pub fn solve_bicgstab(
        &self,
        rhs: &[Float],
        initial_guess: &[Float],
        settings: &IterativeSolverSettings,
    ) -> IterativeSolution {
        let n = self.nr_rows();

        assert_eq!(n, self.nr_cols(), "Matrix must be square for BiCGSTAB");
        assert_eq!(rhs.len(), n, "Right-hand side vector length must match matrix size");
        assert_eq!(initial_guess.len(), n, "Initial guess vector length must match matrix size");

        let rhs_norm = norm(rhs);

        if rhs_norm == 0.0 {
            return IterativeSolution {
                x: vec![0.0; n],
                iterations: 0,
                residual: 0.0,
                converged: true,
            };
        }

        let mut x = initial_guess.to_vec();

        let a_x = self.vector_multiply(&x);

        let mut r: Vec<Float> = (0..n).map(|i| rhs[i] - a_x[i]).collect();
        let r_hat = r.clone();

        let mut residual = norm(&r) / rhs_norm;

        if residual < settings.tolerance {
            return IterativeSolution {
                x,
                iterations: 0,
                residual,
                converged: true,
            };
        }

        let mut rho: Float = 1.0;
        let mut alpha: Float = 1.0;
        let mut omega: Float = 1.0;

        let mut v = vec![0.0; n];
        let mut p = vec![0.0; n];

        for iteration in 1..=settings.max_iterations {
            let rho_new = dot(&r_hat, &r);

            if rho_new.abs() < Float::MIN_POSITIVE {
                return IterativeSolution {
                    x,
                    iterations: iteration,
                    residual,
                    converged: false,
                };
            }

            let beta = (rho_new / rho) * (alpha / omega);

            for i in 0..n {
                p[i] = r[i] + beta * (p[i] - omega * v[i]);
            }

            v = self.vector_multiply(&p);

            let r_hat_dot_v = dot(&r_hat, &v);

            if r_hat_dot_v.abs() < Float::MIN_POSITIVE {
                return IterativeSolution {
                    x,
                    iterations: iteration,
                    residual,
                    converged: false,
                };
            }

            alpha = rho_new / r_hat_dot_v;

            let s: Vec<Float> = (0..n).map(|i| r[i] - alpha * v[i]).collect();

            residual = norm(&s) / rhs_norm;

            if residual < settings.tolerance {
                for i in 0..n {
                    x[i] += alpha * p[i];
                }

                return IterativeSolution {
                    x,
                    iterations: iteration,
                    residual,
                    converged: true,
                };
            }

            let t = self.vector_multiply(&s);

            let t_dot_t = dot(&t, &t);

            if t_dot_t < Float::MIN_POSITIVE {
                return IterativeSolution {
                    x,
                    iterations: iteration,
                    residual,
                    converged: false,
                };
            }

            omega = dot(&t, &s) / t_dot_t;

            for i in 0..n {
                x[i] += alpha * p[i] + omega * s[i];
                r[i] = s[i] - omega * t[i];
            }

            residual = norm(&r) / rhs_norm;

            if residual < settings.tolerance {
                return IterativeSolution {
                    x,
                    iterations: iteration,
                    residual,
                    converged: true,
                };
            }

            rho = rho_new;
        }

        IterativeSolution {
            x,
            iterations: settings.max_iterations,
            residual,
            converged: false,
        }
    }
}
