/// Parameter section decoding: groups and their typed parameters.
use crate::c3d::processor::{Processor, take};
use crate::error::{Result, TransformError};
use constants::c3d_format::{BLOCK_SIZE, TYPE_BYTE, TYPE_CHAR, TYPE_FLOAT, TYPE_INT};

/// Decoded parameter payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterData {
    Char(Vec<u8>),
    Byte(Vec<u8>),
    Int(Vec<i16>),
    Float(Vec<f32>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub description: String,
    pub locked: bool,
    /// Dimensions, first one varying fastest. Empty for scalars.
    pub dimensions: Vec<usize>,
    pub data: ParameterData,
}

impl Parameter {
    /// Character data split into trimmed strings of the first dimension's length.
    pub fn strings(&self) -> Vec<String> {
        let ParameterData::Char(chars) = &self.data else {
            return Vec::new();
        };
        let width = self.dimensions.first().copied().unwrap_or(chars.len());
        if width == 0 {
            return Vec::new();
        }
        chars
            .chunks(width)
            .map(|chunk| String::from_utf8_lossy(chunk).trim_end_matches(['\0', ' ']).to_string())
            .collect()
    }

    /// All numeric values widened to `f64`.
    pub fn numbers(&self) -> Vec<f64> {
        match &self.data {
            ParameterData::Char(_) => Vec::new(),
            ParameterData::Byte(values) => values.iter().map(|&v| f64::from(v)).collect(),
            ParameterData::Int(values) => values.iter().map(|&v| f64::from(v)).collect(),
            ParameterData::Float(values) => values.iter().map(|&v| f64::from(v)).collect(),
        }
    }

    pub fn first_number(&self) -> Option<f64> {
        self.numbers().first().copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Positive group id; entries store it negated.
    pub id: u8,
    pub name: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
}

/// Parameter section contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    pub groups: Vec<Group>,
}

impl Parameters {
    /// Decode the parameter section starting at `offset` in the file image.
    pub fn parse(bytes: &[u8], offset: usize, processor: Processor) -> Result<Self> {
        let [_, _, block_count, _] = take::<4>(bytes, offset, "parameter section")?;
        let end = offset + usize::from(block_count).max(1) * BLOCK_SIZE;
        if end > bytes.len() {
            return Err(TransformError::truncated("parameter section", end, bytes.len()));
        }
        let section = &bytes[..end];

        let mut groups: Vec<Group> = Vec::new();
        let mut orphans: Vec<(u8, Parameter)> = Vec::new();
        let mut pos = offset + 4;

        loop {
            let [name_len, id] = match section.get(pos..pos + 2) {
                Some(&[a, b]) => [a as i8, b as i8],
                _ => break,
            };
            if name_len == 0 {
                break;
            }

            let locked = name_len < 0;
            let name_len = usize::from(name_len.unsigned_abs());
            let name_end = pos + 2 + name_len;
            let name = section
                .get(pos + 2..name_end)
                .map(|raw| String::from_utf8_lossy(raw).to_uppercase())
                .ok_or_else(|| TransformError::truncated("parameter section", name_end, end))?;

            let next = processor.read_i16(take::<2>(section, name_end, "parameter section")?);
            let body = name_end + 2;

            if id < 0 {
                let description = read_description(section, body)?.0;
                let group_id = id.unsigned_abs();
                match groups.iter_mut().find(|g| g.id == group_id) {
                    Some(group) => {
                        group.name = name;
                        group.description = description;
                    }
                    None => groups.push(Group {
                        id: group_id,
                        name,
                        description,
                        parameters: Vec::new(),
                    }),
                }
            } else if id > 0 {
                let parameter = read_parameter(section, body, name, locked, processor)?;
                orphans.push((id as u8, parameter));
            } else {
                return Err(TransformError::malformed(format!(
                    "entry '{name}' has group id zero"
                )));
            }

            if next <= 0 {
                break;
            }
            pos = name_end + next as usize;
        }

        // Parameters may precede the group entry they belong to.
        for (group_id, parameter) in orphans {
            match groups.iter_mut().find(|g| g.id == group_id) {
                Some(group) => group.parameters.push(parameter),
                None => log::warn!(
                    "Parameter '{}' references missing group {}",
                    parameter.name,
                    group_id
                ),
            }
        }

        Ok(Self { groups })
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name.eq_ignore_ascii_case(name))
    }

    /// Look up `GROUP:PARAMETER`, case-insensitively.
    pub fn get(&self, group: &str, parameter: &str) -> Option<&Parameter> {
        self.group(group)?
            .parameters
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(parameter))
    }
}

fn read_description(section: &[u8], pos: usize) -> Result<(String, usize)> {
    let [len] = take::<1>(section, pos, "parameter section")?;
    let end = pos + 1 + usize::from(len);
    let raw = section
        .get(pos + 1..end)
        .ok_or_else(|| TransformError::truncated("parameter section", end, section.len()))?;
    Ok((String::from_utf8_lossy(raw).trim_end().to_string(), end))
}

fn read_parameter(
    section: &[u8],
    pos: usize,
    name: String,
    locked: bool,
    processor: Processor,
) -> Result<Parameter> {
    let [data_type, dim_count] = take::<2>(section, pos, "parameter section")?;
    let data_type = data_type as i8;
    let dims_end = pos + 2 + usize::from(dim_count);
    let dimensions: Vec<usize> = section
        .get(pos + 2..dims_end)
        .ok_or_else(|| TransformError::truncated("parameter section", dims_end, section.len()))?
        .iter()
        .map(|&d| usize::from(d))
        .collect();

    let count: usize = dimensions.iter().product();
    let element_size = usize::from(data_type.unsigned_abs());
    let data_end = dims_end + count * element_size;
    let raw = section
        .get(dims_end..data_end)
        .ok_or_else(|| TransformError::truncated("parameter section", data_end, section.len()))?;

    let data = match data_type {
        TYPE_CHAR => ParameterData::Char(raw.to_vec()),
        TYPE_BYTE => ParameterData::Byte(raw.to_vec()),
        TYPE_INT => ParameterData::Int(
            raw.chunks_exact(2)
                .map(|c| processor.read_i16([c[0], c[1]]))
                .collect(),
        ),
        TYPE_FLOAT => ParameterData::Float(
            raw.chunks_exact(4)
                .map(|c| processor.read_f32([c[0], c[1], c[2], c[3]]))
                .collect(),
        ),
        other => {
            return Err(TransformError::malformed(format!(
                "parameter '{name}' has data type {other}"
            )));
        }
    };

    let description = read_description(section, data_end)?.0;

    Ok(Parameter {
        name,
        description,
        locked,
        dimensions,
        data,
    })
}
