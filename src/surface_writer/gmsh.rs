
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Export of surfaces and per-panel views as Gmsh 2.2 ASCII mesh files.

use std::fs::File;
use std::io::{Write, BufWriter};
use std::path::Path;

use vortexmath::type_aliases::Float;

use crate::surface::Surface;
use crate::error::Error;

use super::SurfaceWriter;

#[derive(Debug, Clone, Default)]
pub struct GmshSurfaceWriter;

impl SurfaceWriter for GmshSurfaceWriter {
    fn file_extension(&self) -> &'static str {
        ".msh"
    }

    /// Node and element tags are offset by the global node and panel offsets, so that the files
    /// of all surfaces of a simulation can be merged into one Gmsh model
    fn write(
        &self,
        surface: &Surface,
        file_path: &Path,
        node_offset: usize,
        panel_offset: usize,
        view_names: &[String],
        view_data: &[Vec<Float>],
    ) -> Result<(), Error> {
        let f = File::create(file_path)?;

        let mut writer = BufWriter::new(f);

        write!(writer, "$MeshFormat\n")?;
        write!(writer, "2.2 0 8\n")?;
        write!(writer, "$EndMeshFormat\n")?;

        // Gmsh tags are one-based
        write!(writer, "$Nodes\n")?;
        write!(writer, "{}\n", surface.nr_nodes())?;

        for (i_node, node) in surface.nodes.iter().enumerate() {
            write!(
                writer,
                "{} {} {} {}\n",
                node_offset + i_node + 1,
                node[0],
                node[1],
                node[2]
            )?;
        }

        write!(writer, "$EndNodes\n")?;

        // Element type 3 is the 4-node quadrangle
        write!(writer, "$Elements\n")?;
        write!(writer, "{}\n", surface.nr_panels())?;

        for (i_panel, panel) in surface.panels.iter().enumerate() {
            write!(
                writer,
                "{} 3 2 0 0 {} {} {} {}\n",
                panel_offset + i_panel + 1,
                node_offset + panel[0] + 1,
                node_offset + panel[1] + 1,
                node_offset + panel[2] + 1,
                node_offset + panel[3] + 1
            )?;
        }

        write!(writer, "$EndElements\n")?;

        for (view_name, values) in view_names.iter().zip(view_data.iter()) {
            write!(writer, "$ElementData\n")?;
            write!(writer, "1\n")?;
            write!(writer, "\"{}\"\n", view_name)?;
            write!(writer, "1\n")?;
            write!(writer, "0.0\n")?;
            write!(writer, "3\n")?;
            write!(writer, "0\n")?;
            write!(writer, "1\n")?;
            write!(writer, "{}\n", values.len())?;

            for (i_panel, value) in values.iter().enumerate() {
                write!(writer, "{} {}\n", panel_offset + i_panel + 1, value)?;
            }

            write!(writer, "$EndElementData\n")?;
        }

        writer.flush()?;

        Ok(())
    }
}
