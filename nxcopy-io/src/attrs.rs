//! Attribute writing, copying and string reading.
//!
//! Strings are written as fixed-width, null-padded HDF5 strings rather than
//! variable-length ones: several NeXus readers only understand the former.

use crate::{Error, Result};
use hdf5::types::{
    FixedAscii, FixedUnicode, H5Type, StringError, TypeDescriptor, VarLenAscii, VarLenUnicode,
};
use hdf5::{Attribute, Container, Location};
use log::debug;
use std::str::FromStr;

/// Longest string, in bytes, written or read through a fixed-width buffer.
pub const MAX_FIXED_STR: usize = 4096;

type AsciiBuf = FixedAscii<MAX_FIXED_STR>;
type UnicodeBuf = FixedUnicode<MAX_FIXED_STR>;

/// Attribute value accepted by [`write_attributes`].
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    IntArray(Vec<i64>),
    FloatArray(Vec<f64>),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for AttrValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<i64>> for AttrValue {
    fn from(value: Vec<i64>) -> Self {
        Self::IntArray(value)
    }
}

impl From<Vec<f64>> for AttrValue {
    fn from(value: Vec<f64>) -> Self {
        Self::FloatArray(value)
    }
}

/// Writes each `(name, value)` pair as an attribute of `node`.
///
/// # Errors
/// Returns an error if an attribute already exists, a string is longer than
/// the widest supported fixed string, or HDF5 I/O fails.
pub fn write_attributes<'a, I>(node: &Location, attrs: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, AttrValue)>,
{
    for (name, value) in attrs {
        debug!("attr {}@{name} = {value:?}", node.name());
        match value {
            AttrValue::Str(s) => write_fixed_str(node, name, &s)?,
            AttrValue::Int(v) => write_scalar(node, name, &v)?,
            AttrValue::UInt(v) => write_scalar(node, name, &v)?,
            AttrValue::Float(v) => write_scalar(node, name, &v)?,
            AttrValue::Bool(v) => write_scalar(node, name, &v)?,
            AttrValue::IntArray(v) => write_array(node, name, &v)?,
            AttrValue::FloatArray(v) => write_array(node, name, &v)?,
        }
    }
    Ok(())
}

/// Reads a string attribute, whatever its string flavour.
///
/// # Errors
/// Returns an error if the attribute is missing or does not hold text.
pub fn read_attr_string(node: &Location, name: &str) -> Result<String> {
    let attr = node
        .attr(name)
        .map_err(|_| Error::missing(format!("{}@{name}", node.name())))?;
    read_string(&attr, &format!("{}@{name}", node.name()))
}

/// Reads the first string held by a dataset or attribute.
///
/// Variable-length and fixed-width strings of either encoding are accepted.
///
/// # Errors
/// Returns an error if the container does not hold text or is empty.
pub fn read_string(container: &Container, path: &str) -> Result<String> {
    match container.dtype()?.to_descriptor()? {
        TypeDescriptor::VarLenAscii => {
            first_value::<VarLenAscii>(container, path).map(|v| v.as_str().to_string())
        }
        TypeDescriptor::VarLenUnicode => {
            first_value::<VarLenUnicode>(container, path).map(|v| v.as_str().to_string())
        }
        TypeDescriptor::FixedAscii(_) => {
            first_value::<AsciiBuf>(container, path).map(|v| v.as_str().to_string())
        }
        TypeDescriptor::FixedUnicode(_) => {
            first_value::<UnicodeBuf>(container, path).map(|v| v.as_str().to_string())
        }
        other => Err(Error::InvalidFormat(format!(
            "{path} does not hold a string ({other:?})"
        ))),
    }
}

/// Copies every attribute of `source` onto `dest`.
///
/// Each copy is created with the datatype of its source, so widths and
/// encodings are unchanged. Values pass through the widest matching Rust
/// type.
///
/// # Errors
/// Returns `UnsupportedType` for compound, enum, array, opaque and reference
/// attributes, or an error if an attribute already exists on `dest`.
pub fn copy_attributes(source: &Location, dest: &Location) -> Result<()> {
    for name in source.attr_names()? {
        let attr = source.attr(&name)?;
        let descriptor = attr.dtype()?.to_descriptor()?;
        debug!("attr {}@{name} ({descriptor:?})", source.name());
        match &descriptor {
            TypeDescriptor::Integer(_) => transfer::<i64>(&attr, dest, &name, &descriptor)?,
            TypeDescriptor::Unsigned(_) => transfer::<u64>(&attr, dest, &name, &descriptor)?,
            TypeDescriptor::Float(_) => transfer::<f64>(&attr, dest, &name, &descriptor)?,
            TypeDescriptor::Boolean => transfer::<bool>(&attr, dest, &name, &descriptor)?,
            TypeDescriptor::VarLenAscii => {
                transfer::<VarLenAscii>(&attr, dest, &name, &descriptor)?;
            }
            TypeDescriptor::VarLenUnicode => {
                transfer::<VarLenUnicode>(&attr, dest, &name, &descriptor)?;
            }
            TypeDescriptor::FixedAscii(_) => {
                transfer::<AsciiBuf>(&attr, dest, &name, &descriptor)?;
            }
            TypeDescriptor::FixedUnicode(_) => {
                transfer::<UnicodeBuf>(&attr, dest, &name, &descriptor)?;
            }
            other => {
                return Err(Error::UnsupportedType {
                    path: format!("{}@{name}", source.name()),
                    descriptor: format!("{other:?}"),
                });
            }
        }
    }
    Ok(())
}

fn transfer<T: H5Type>(
    attr: &Attribute,
    dest: &Location,
    name: &str,
    descriptor: &TypeDescriptor,
) -> Result<()> {
    let builder = dest.new_attr_builder().empty_as(descriptor);
    if attr.is_scalar() {
        let value = attr.read_scalar::<T>()?;
        builder.create(name)?.write_scalar(&value)?;
    } else {
        let values = attr.read_raw::<T>()?;
        builder
            .shape(attr.shape())
            .create(name)?
            .write_raw(values.as_slice())?;
    }
    Ok(())
}

fn first_value<T: H5Type>(container: &Container, path: &str) -> Result<T> {
    if container.is_scalar() {
        return Ok(container.read_scalar::<T>()?);
    }
    container
        .read_raw::<T>()?
        .into_iter()
        .next()
        .ok_or_else(|| Error::InvalidFormat(format!("{path} is empty")))
}

fn write_scalar<T: H5Type>(node: &Location, name: &str, value: &T) -> Result<()> {
    node.new_attr::<T>().create(name)?.write_scalar(value)?;
    Ok(())
}

fn write_array<T: H5Type>(node: &Location, name: &str, values: &[T]) -> Result<()> {
    node.new_attr::<T>()
        .shape((values.len(),))
        .create(name)?
        .write(ndarray::ArrayView1::from(values))?;
    Ok(())
}

/// Writes `value` as a scalar fixed-width string exactly as wide as its bytes.
fn write_fixed_str(node: &Location, name: &str, value: &str) -> Result<()> {
    if value.len() > MAX_FIXED_STR {
        return Err(Error::InvalidFormat(format!(
            "attribute {name} is too long for a fixed-width string ({} bytes)",
            value.len()
        )));
    }
    let width = value.len().max(1);
    let invalid = |e: StringError| Error::InvalidFormat(format!("attribute {name}: {e}"));
    if value.is_ascii() {
        let encoded = AsciiBuf::from_ascii(value).map_err(invalid)?;
        node.new_attr_builder()
            .empty_as(&TypeDescriptor::FixedAscii(width))
            .create(name)?
            .write_scalar(&encoded)?;
    } else {
        let encoded = UnicodeBuf::from_str(value).map_err(invalid)?;
        node.new_attr_builder()
            .empty_as(&TypeDescriptor::FixedUnicode(width))
            .create(name)?
            .write_scalar(&encoded)?;
    }
    Ok(())
}
