use crate::config::OutputConfig;
use crate::error::{HexsieveError, Result};
use hexsieve_types::{PolygonGroup, Ring};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// KML document writer: one styled placemark per polygon group.
#[derive(Debug, Clone, PartialEq)]
pub struct KmlWriter {
    document_name: String,
    polygon_color: String,
}

impl KmlWriter {
    pub fn new(document_name: impl Into<String>, polygon_color: impl Into<String>) -> Self {
        Self {
            document_name: document_name.into(),
            polygon_color: polygon_color.into(),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.document_name.clone(), config.polygon_color.clone())
    }

    /// Render a complete KML document.
    ///
    /// Placemarks are named after the first vertex of their outer ring.
    pub fn render(&self, groups: &[PolygonGroup]) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(groups, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| HexsieveError::Serialization(e.to_string()))
    }

    pub fn write<P: AsRef<Path>>(&self, groups: &[PolygonGroup], path: P) -> Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_to(groups, &mut file)?;
        file.flush()?;
        Ok(())
    }

    /// Stream the document into any byte sink.
    pub fn write_to<W: Write>(&self, groups: &[PolygonGroup], sink: W) -> Result<()> {
        let mut writer = Writer::new_with_indent(sink, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new("kml").with_attributes([("xmlns", KML_NAMESPACE)]),
        ))?;
        writer.write_event(Event::Start(BytesStart::new("Document")))?;
        text_element(&mut writer, "name", &self.document_name)?;

        for group in groups {
            self.write_placemark(&mut writer, group)?;
        }

        writer.write_event(Event::End(BytesEnd::new("Document")))?;
        writer.write_event(Event::End(BytesEnd::new("kml")))?;
        Ok(())
    }

    fn write_placemark<W: Write>(
        &self,
        writer: &mut Writer<W>,
        group: &PolygonGroup,
    ) -> io::Result<()> {
        let name = group
            .outer
            .first()
            .map(ToString::to_string)
            .unwrap_or_default();

        writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
        text_element(writer, "name", &name)?;
        writer.write_event(Event::Start(BytesStart::new("Style")))?;
        writer.write_event(Event::Start(BytesStart::new("PolyStyle")))?;
        text_element(writer, "color", &self.polygon_color)?;
        writer.write_event(Event::End(BytesEnd::new("PolyStyle")))?;
        writer.write_event(Event::End(BytesEnd::new("Style")))?;

        writer.write_event(Event::Start(BytesStart::new("Polygon")))?;
        write_boundary(writer, "outerBoundaryIs", &group.outer)?;
        for hole in &group.holes {
            write_boundary(writer, "innerBoundaryIs", hole)?;
        }
        writer.write_event(Event::End(BytesEnd::new("Polygon")))?;
        writer.write_event(Event::End(BytesEnd::new("Placemark")))
    }
}

impl Default for KmlWriter {
    fn default() -> Self {
        Self::from_config(&OutputConfig::default())
    }
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))
}

fn write_boundary<W: Write>(writer: &mut Writer<W>, element: &str, ring: &Ring) -> io::Result<()> {
    let coordinates = ring
        .closed_points()
        .map(|p| format!("{},{},0", p.lng(), p.lat()))
        .collect::<Vec<_>>()
        .join(" ");

    writer.write_event(Event::Start(BytesStart::new(element)))?;
    writer.write_event(Event::Start(BytesStart::new("LinearRing")))?;
    text_element(writer, "coordinates", &coordinates)?;
    writer.write_event(Event::End(BytesEnd::new("LinearRing")))?;
    writer.write_event(Event::End(BytesEnd::new(element)))
}
