
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Per-step logging of the coefficient distributions through a surface writer.

use std::path::PathBuf;

use crate::surface_writer::SurfaceWriter;
use crate::io_utils::folder_management::ensure_folder_exists;
use crate::error::Error;

use super::{Solver, SurfaceSlot};

impl Solver {
    /// Writes the current doublet, source and pressure distributions of every registered surface
    /// and the doublet distributions of every wake to the log folder.
    ///
    /// Layout: one subdirectory per body id, one subdirectory per surface or wake
    /// (`non_lifting_surface_<i>`, `lifting_surface_<i>`, `wake_<i>`), one file per step. Node
    /// and panel offsets accumulate over all surfaces and wakes in body-then-surface order.
    /// A log folder that cannot be created is reported on standard error and its surface is
    /// skipped, so that logging stays best-effort.
    pub fn log(&self, step_number: usize, writer: &dyn SurfaceWriter) -> Result<(), Error> {
        let root_folder = PathBuf::from(&self.log_folder);

        let mut node_offset = 0;
        let mut panel_offset = 0;

        for (body_index, body) in self.bodies.iter().enumerate() {
            let body_folder = root_folder.join(&body.id);

            for binding in self.bindings.iter().filter(|b| b.body_index == body_index) {
                let (folder_name, surface) = match binding.slot {
                    SurfaceSlot::NonLifting(i_surface) => (
                        format!("non_lifting_surface_{}", i_surface),
                        &body.non_lifting_surfaces[i_surface],
                    ),
                    SurfaceSlot::Lifting(i_surface) => (
                        format!("lifting_surface_{}", i_surface),
                        &body.lifting_surfaces[i_surface].lifting_surface.surface,
                    ),
                };

                let surface_folder = body_folder.join(folder_name);

                if let Err(error) = ensure_folder_exists(&surface_folder) {
                    eprintln!(
                        "Solver: could not create log folder {}: {}",
                        surface_folder.display(), error
                    );

                    node_offset += surface.nr_nodes();
                    panel_offset += surface.nr_panels();

                    continue;
                }

                let file_path = surface_folder.join(
                    format!("step_{}{}", step_number, writer.file_extension())
                );

                let view_names = vec![
                    "DoubletDistribution".to_string(),
                    "SourceDistribution".to_string(),
                    "PressureDistribution".to_string(),
                ];

                let start = binding.panel_offset;
                let end = binding.panel_offset + binding.nr_panels;

                let view_data = vec![
                    self.doublet_coefficients[start..end].to_vec(),
                    self.source_coefficients[start..end].to_vec(),
                    self.pressure_coefficients[start..end].to_vec(),
                ];

                writer.write(
                    surface,
                    &file_path,
                    node_offset,
                    panel_offset,
                    &view_names,
                    &view_data,
                )?;

                node_offset += surface.nr_nodes();
                panel_offset += surface.nr_panels();
            }

            for (i_wake, bundle) in body.lifting_surfaces.iter().enumerate() {
                let wake_folder = body_folder.join(format!("wake_{}", i_wake));

                if let Err(error) = ensure_folder_exists(&wake_folder) {
                    eprintln!(
                        "Solver: could not create log folder {}: {}",
                        wake_folder.display(), error
                    );

                    node_offset += bundle.wake.nr_nodes();
                    panel_offset += bundle.wake.nr_panels();

                    continue;
                }

                let file_path = wake_folder.join(
                    format!("step_{}{}", step_number, writer.file_extension())
                );

                let view_names = vec!["DoubletDistribution".to_string()];
                let view_data = vec![bundle.wake.doublet_coefficients.clone()];

                writer.write(
                    &bundle.wake.surface,
                    &file_path,
                    node_offset,
                    panel_offset,
                    &view_names,
                    &view_data,
                )?;

                node_offset += bundle.wake.nr_nodes();
                panel_offset += bundle.wake.nr_panels();
            }
        }

        Ok(())
    }
}
