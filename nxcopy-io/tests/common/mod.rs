//! NeXus fixtures shared by the integration tests.
#![allow(dead_code)]

use hdf5::types::{FixedAscii, TypeDescriptor, VarLenUnicode};
use hdf5::{Dataset, File, Group, LinkType, Location};
use ndarray::{Array3, ArrayView1};
use nxcopy_io::attrs::read_string;
use nxcopy_io::{read_attr_string, write_attributes, AttrValue};
use std::path::Path;
use std::str::FromStr;

/// Detector flavour of a template.
#[derive(Clone, Copy)]
pub enum Template {
    /// Full angle list in `entry/data/omega`.
    Eiger,
    /// `(start, stop)` pair in `entry/data/omega`.
    Timepix { start: f64, stop: f64 },
}

fn vector(group: &Group, name: &str, values: &[f64]) -> Dataset {
    let dataset = group
        .new_dataset::<f64>()
        .shape((values.len(),))
        .create(name)
        .unwrap();
    dataset.write(ArrayView1::from(values)).unwrap();
    dataset
}

fn text(group: &Group, name: &str, value: &str) {
    let value = VarLenUnicode::from_str(value).unwrap();
    group
        .new_dataset::<VarLenUnicode>()
        .shape(())
        .create(name)
        .unwrap()
        .write_scalar(&value)
        .unwrap();
}

fn axis_attrs(dataset: &Location) {
    write_attributes(
        dataset,
        [
            ("units", AttrValue::from("deg")),
            ("transformation_type", AttrValue::from("rotation")),
            ("vector", AttrValue::from(vec![-1.0, 0.0, 0.0])),
            ("depends_on", AttrValue::from(".")),
        ],
    )
    .unwrap();
}

/// Writes a template description to `path`.
pub fn write_template(path: &Path, template: Template) {
    let file = File::create(path).unwrap();
    let entry = file.create_group("entry").unwrap();
    write_attributes(&entry, [("NX_class", AttrValue::from("NXentry"))]).unwrap();
    text(&entry, "start_time", "2024-05-01T10:00:00");

    let instrument = entry.create_group("instrument").unwrap();
    write_attributes(&instrument, [("NX_class", AttrValue::from("NXinstrument"))]).unwrap();
    let detector = instrument.create_group("detector").unwrap();
    write_attributes(&detector, [("NX_class", AttrValue::from("NXdetector"))]).unwrap();
    let description = match template {
        Template::Eiger => "Dectris Eiger2 X 9M",
        Template::Timepix { .. } => "Timepix3 2x2",
    };
    text(&detector, "description", description);
    let distance = detector
        .new_dataset::<f64>()
        .shape(())
        .create("distance")
        .unwrap();
    distance.write_scalar(&0.25).unwrap();
    write_attributes(&distance, [("units", AttrValue::from("m"))]).unwrap();
    detector.link_soft("/entry/data/data", "data").unwrap();
    detector
        .link_external("flatfield_0001.h5", "/flatfield", "flatfield")
        .unwrap();
    let beamline = FixedAscii::<12>::from_ascii("I24 beamline").unwrap();
    instrument
        .new_dataset::<FixedAscii<12>>()
        .shape(())
        .create("name")
        .unwrap()
        .write_scalar(&beamline)
        .unwrap();
    let module = detector.create_group("module").unwrap();
    module
        .new_dataset::<i32>()
        .shape((2,))
        .create("data_size")
        .unwrap()
        .write(ArrayView1::from(&[3262_i32, 3108]))
        .unwrap();

    let sample = entry.create_group("sample").unwrap();
    write_attributes(&sample, [("NX_class", AttrValue::from("NXsample"))]).unwrap();
    let transformations = sample.create_group("transformations").unwrap();
    let positioner = sample.create_group("sample_omega").unwrap();
    axis_attrs(&vector(&transformations, "omega", &[0.0, 0.0]));
    axis_attrs(&vector(&positioner, "omega", &[0.0, 0.0]));

    let data = entry.create_group("data").unwrap();
    write_attributes(&data, [("NX_class", AttrValue::from("NXdata"))]).unwrap();
    match template {
        Template::Eiger => {
            axis_attrs(&vector(&data, "omega", &[0.0, 0.1, 0.2, 0.3]));
        }
        Template::Timepix { start, stop } => {
            axis_attrs(&vector(&data, "omega", &[start, stop]));
        }
    }
    let frames = Array3::<u16>::from_shape_fn((4, 8, 8), |(f, y, x)| {
        u16::try_from(f * 64 + y * 8 + x).unwrap()
    });
    data.new_dataset::<u16>()
        .shape(frames.shape().to_vec())
        .create("data")
        .unwrap()
        .write(&frames)
        .unwrap();
}

/// Writes a payload with one member per name, each holding `len` counts.
pub fn write_payload(path: &Path, members: &[&str], len: usize) {
    let file = File::create(path).unwrap();
    for (i, name) in members.iter().enumerate() {
        let values: Vec<u32> = (0..len).map(|v| u32::try_from(v + i).unwrap()).collect();
        file.new_dataset::<u32>()
            .shape((len,))
            .create(*name)
            .unwrap()
            .write(ArrayView1::from(values.as_slice()))
            .unwrap();
    }
}

fn is_numeric(descriptor: &TypeDescriptor) -> bool {
    matches!(
        descriptor,
        TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) | TypeDescriptor::Float(_)
    )
}

fn is_text(descriptor: &TypeDescriptor) -> bool {
    matches!(
        descriptor,
        TypeDescriptor::FixedAscii(_)
            | TypeDescriptor::FixedUnicode(_)
            | TypeDescriptor::VarLenAscii
            | TypeDescriptor::VarLenUnicode
    )
}

/// Names and link kinds of the members of `group`, in name order.
pub fn link_types(group: &Group) -> Vec<(String, LinkType)> {
    group
        .iter_visit_default(Vec::new(), |_, name, info, links| {
            links.push((name.to_string(), info.link_type));
            true
        })
        .unwrap()
}

fn sorted_attr_names(location: &Location) -> Vec<String> {
    let mut names = location.attr_names().unwrap();
    names.sort();
    names
}

fn assert_same_attrs(a: &Location, b: &Location) {
    let names = sorted_attr_names(a);
    assert_eq!(names, sorted_attr_names(b), "attributes of {}", a.name());
    for name in names {
        let left = a.attr(&name).unwrap();
        let right = b.attr(&name).unwrap();
        let descriptor = left.dtype().unwrap().to_descriptor().unwrap();
        assert_eq!(
            descriptor,
            right.dtype().unwrap().to_descriptor().unwrap(),
            "datatype of {}@{name}",
            a.name()
        );
        assert_eq!(left.shape(), right.shape(), "shape of {}@{name}", a.name());
        if is_numeric(&descriptor) {
            assert_eq!(
                left.read_raw::<f64>().unwrap(),
                right.read_raw::<f64>().unwrap(),
                "{}@{name}",
                a.name()
            );
        } else if is_text(&descriptor) {
            assert_eq!(
                read_attr_string(a, &name).unwrap(),
                read_attr_string(b, &name).unwrap(),
                "{}@{name}",
                a.name()
            );
        }
    }
}

fn assert_same_dataset(left: &Dataset, right: &Dataset) {
    let descriptor = left.dtype().unwrap().to_descriptor().unwrap();
    assert_eq!(
        descriptor,
        right.dtype().unwrap().to_descriptor().unwrap(),
        "datatype of {}",
        left.name()
    );
    assert_eq!(left.shape(), right.shape(), "shape of {}", left.name());
    assert_eq!(left.chunk(), right.chunk(), "chunking of {}", left.name());
    assert_eq!(left.filters(), right.filters(), "filters of {}", left.name());
    if is_numeric(&descriptor) {
        assert_eq!(
            left.read_raw::<f64>().unwrap(),
            right.read_raw::<f64>().unwrap(),
            "{}",
            left.name()
        );
    } else if is_text(&descriptor) {
        assert_eq!(
            read_string(left, &left.name()).unwrap(),
            read_string(right, &right.name()).unwrap()
        );
    }
    assert_same_attrs(left, right);
}

/// Asserts that two groups hold the same links, datatypes, values and
/// attributes. Soft and external links are compared by kind only.
pub fn assert_same_tree(a: &Group, b: &Group) {
    let links = link_types(a);
    assert_eq!(links, link_types(b), "links of {}", a.name());
    assert_same_attrs(a, b);
    for (name, kind) in links {
        if kind != LinkType::Hard {
            continue;
        }
        if let Ok(child) = a.group(&name) {
            assert_same_tree(&child, &b.group(&name).unwrap());
        } else {
            assert_same_dataset(&a.dataset(&name).unwrap(), &b.dataset(&name).unwrap());
        }
    }
}
