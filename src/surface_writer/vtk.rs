
// Copyright (C) 2024, NTNU
// Author: Jarle Vinje Kramer <jarlekramer@gmail.com; jarle.a.kramer@ntnu.no>
// License: GPL v3.0 (see separate file LICENSE or https://www.gnu.org/licenses/gpl-3.0.html)

//! Export of surfaces and per-panel views as VTK XML PolyData files.

use std::fs::File;
use std::io::{Write, BufWriter};
use std::path::Path;

use vortexmath::type_aliases::Float;

use crate::surface::Surface;
use crate::error::Error;

use super::SurfaceWriter;

#[derive(Debug, Clone, Default)]
pub struct VtkSurfaceWriter;

impl SurfaceWriter for VtkSurfaceWriter {
    fn file_extension(&self) -> &'static str {
        ".vtp"
    }

    /// VTK PolyData files are self-contained, so the global node and panel offsets are not used
    fn write(
        &self,
        surface: &Surface,
        file_path: &Path,
        _node_offset: usize,
        _panel_offset: usize,
        view_names: &[String],
        view_data: &[Vec<Float>],
    ) -> Result<(), Error> {
        let f = File::create(file_path)?;

        let mut writer = BufWriter::new(f);

        let nr_points = surface.nr_nodes();
        let nr_faces = surface.nr_panels();

        // Header
        write!(writer, "<?xml version=\"1.0\"?>\n")?;
        write!(writer, "<VTKFile type=\"PolyData\" version=\"0.1\" byte_order=\"LittleEndian\">\n")?;
        write!(writer, "\t<PolyData>\n")?;
        write!(
            writer,
            "\t\t<Piece NumberOfPoints=\"{}\" NumberOfVerts=\"0\" NumberOfLines=\"0\" NumberOfStrips=\"0\" NumberOfPolys=\"{}\">\n",
            nr_points,
            nr_faces
        )?;

        // Write points
        write!(writer, "\t\t\t<Points>\n")?;
        write!(writer, "\t\t\t\t<DataArray type=\"Float32\" NumberOfComponents=\"3\" format=\"ascii\">\n")?;
        for i in 0..nr_points {
            write!(
                writer,
                "\t\t\t\t\t{} {} {}\n",
                surface.nodes[i][0],
                surface.nodes[i][1],
                surface.nodes[i][2]
            )?;
        }

        write!(writer, "\t\t\t\t</DataArray>\n")?;
        write!(writer, "\t\t\t</Points>\n")?;

        // Write faces
        write!(writer, "\t\t\t<Polys>\n")?;
        write!(writer, "\t\t\t\t<DataArray type=\"Int32\" Name=\"connectivity\" format=\"ascii\">\n")?;

        for panel in &surface.panels {
            write!(
                writer,
                "\t\t\t\t\t{} {} {} {}\n",
                panel[0],
                panel[1],
                panel[2],
                panel[3]
            )?;
        }

        write!(writer, "\t\t\t\t</DataArray>\n")?;
        write!(writer, "\t\t\t\t<DataArray type=\"Int32\" Name=\"offsets\" format=\"ascii\">\n")?;
        for i in 0..nr_faces {
            write!(writer, "\t\t\t\t\t{}\n", (i + 1) * 4)?;
        }
        write!(writer, "\t\t\t\t</DataArray>\n")?;
        write!(writer, "\t\t\t</Polys>\n")?;

        // Write the per-panel views
        if !view_names.is_empty() {
            write!(writer, "\t\t\t<CellData Scalars=\"{}\">\n", view_names[0])?;

            for (view_name, values) in view_names.iter().zip(view_data.iter()) {
                write!(
                    writer,
                    "\t\t\t\t<DataArray type=\"Float32\" Name=\"{}\" format=\"ascii\">\n",
                    view_name
                )?;

                for value in values {
                    write!(writer, "\t\t\t\t\t{}\n", value)?;
                }

                write!(writer, "\t\t\t\t</DataArray>\n")?;
            }

            write!(writer, "\t\t\t</CellData>\n")?;
        }

        write!(writer, "\t\t</Piece>\n")?;
        write!(writer, "\t</PolyData>\n")?;
        write!(writer, "</VTKFile>\n")?;

        writer.flush()?;

        Ok(())
    }
}
