use crate::common::MemoryBlockDevice;
use std::collections::HashMap;

pub const BLOCK_SIZE: usize = 2048;

/// SUSP indicator entry placed in the primary root "." record when Rock Ridge is on
const SP_ENTRY: [u8; 7] = [b'S', b'P', 7, 1, 0xBE, 0xEF, 0];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tree {
    Primary,
    Joliet,
}

enum Node {
    Dir(DirNode),
    File { name: String, content: Vec<u8> },
    Raw(Vec<u8>),
}

#[derive(Default)]
struct DirNode {
    name: String,
    children: Vec<Node>,
}

impl DirNode {
    fn child_dir_mut(&mut self, name: &str) -> &mut DirNode {
        let pos = self
            .children
            .iter()
            .position(|c| matches!(c, Node::Dir(d) if d.name == name));
        let idx = match pos {
            Some(idx) => idx,
            None => {
                self.children.push(Node::Dir(DirNode {
                    name: name.to_string(),
                    children: Vec::new(),
                }));
                self.children.len() - 1
            }
        };
        match &mut self.children[idx] {
            Node::Dir(d) => d,
            _ => unreachable!(),
        }
    }
}

/// Lays out a small ISO image: PVD, optional Joliet SVD, terminator, both
/// directory trees and file data. Primary names are upper-cased, file names
/// in both trees carry ";1".
pub struct IsoBuilder {
    root: DirNode,
    joliet: bool,
    rock_ridge: bool,
    foreign_descriptor: bool,
    volume_id: String,
}

impl IsoBuilder {
    pub fn new() -> Self {
        Self {
            root: DirNode::default(),
            joliet: false,
            rock_ridge: false,
            foreign_descriptor: false,
            volume_id: "TEST VOLUME".to_string(),
        }
    }

    /// Add a file, creating parent directories as needed
    pub fn add_file(&mut self, path: &str, content: &[u8]) -> &mut Self {
        let (dir, name) = self.parent_of(path);
        dir.children.push(Node::File {
            name: name.to_string(),
            content: content.to_vec(),
        });
        self
    }

    /// Add an (empty) directory, creating parents as needed
    pub fn add_dir(&mut self, path: &str) -> &mut Self {
        let (dir, name) = self.parent_of(path);
        dir.child_dir_mut(name);
        self
    }

    /// Append raw record bytes to a directory, in both trees
    pub fn add_raw_record(&mut self, dir_path: &str, record: &[u8]) -> &mut Self {
        let dir = self.dir_mut(dir_path);
        dir.children.push(Node::Raw(record.to_vec()));
        self
    }

    pub fn with_joliet(&mut self) -> &mut Self {
        self.joliet = true;
        self
    }

    pub fn with_rock_ridge(&mut self) -> &mut Self {
        self.rock_ridge = true;
        self
    }

    /// Put a block without the CD001 identifier inside the descriptor set
    pub fn with_foreign_descriptor(&mut self) -> &mut Self {
        self.foreign_descriptor = true;
        self
    }

    pub fn with_volume_id(&mut self, id: &str) -> &mut Self {
        self.volume_id = id.to_string();
        self
    }

    fn dir_mut(&mut self, path: &str) -> &mut DirNode {
        let mut dir = &mut self.root;
        for seg in path.split('/').filter(|s| !s.is_empty()) {
            dir = dir.child_dir_mut(seg);
        }
        dir
    }

    fn parent_of<'p>(&mut self, path: &'p str) -> (&mut DirNode, &'p str) {
        let trimmed = path.trim_start_matches('/');
        match trimmed.rsplit_once('/') {
            Some((parent, name)) => (self.dir_mut(parent), name),
            None => (&mut self.root, trimmed),
        }
    }

    pub fn build(&self) -> MemoryBlockDevice {
        // Descriptor set
        let pvd_lba = 16u32;
        let mut next = pvd_lba + 1;
        let foreign_lba = if self.foreign_descriptor {
            next += 1;
            Some(next - 1)
        } else {
            None
        };
        let svd_lba = if self.joliet {
            next += 1;
            Some(next - 1)
        } else {
            None
        };
        let term_lba = next;
        next += 1;

        // Directory extents
        let mut primary_dirs = HashMap::new();
        self.assign_dirs(Tree::Primary, &self.root, String::new(), true, &mut next, &mut primary_dirs);
        let mut joliet_dirs = HashMap::new();
        if self.joliet {
            self.assign_dirs(Tree::Joliet, &self.root, String::new(), true, &mut next, &mut joliet_dirs);
        }

        // File extents
        let mut files = HashMap::new();
        Self::assign_files(&self.root, String::new(), &mut next, &mut files);

        let mut data = vec![0u8; (next as usize + 1) * BLOCK_SIZE];

        self.write_descriptor(&mut data, pvd_lba, 1, Tree::Primary, primary_dirs[""]);
        if let Some(lba) = foreign_lba {
            let off = lba as usize * BLOCK_SIZE;
            data[off] = 1;
            data[off + 1..off + 6].copy_from_slice(b"BEA01");
        }
        if let Some(lba) = svd_lba {
            self.write_descriptor(&mut data, lba, 2, Tree::Joliet, joliet_dirs[""]);
        }
        let term = term_lba as usize * BLOCK_SIZE;
        data[term] = 255;
        data[term + 1..term + 6].copy_from_slice(b"CD001");
        data[term + 6] = 1;

        self.write_dirs(&mut data, Tree::Primary, &self.root, "", "", &primary_dirs, &files);
        if self.joliet {
            self.write_dirs(&mut data, Tree::Joliet, &self.root, "", "", &joliet_dirs, &files);
        }

        Self::write_files(&mut data, &self.root, String::new(), &files);

        MemoryBlockDevice::new(data)
    }

    fn write_descriptor(&self, data: &mut [u8], lba: u32, type_code: u8, tree: Tree, root: (u32, u32)) {
        let off = lba as usize * BLOCK_SIZE;
        data[off] = type_code;
        data[off + 1..off + 6].copy_from_slice(b"CD001");
        data[off + 6] = 1;

        let volume_id: Vec<u8> = match tree {
            Tree::Primary => {
                let mut id = self.volume_id.as_bytes().to_vec();
                id.resize(32, b' ');
                id
            }
            Tree::Joliet => {
                let mut id = utf16_be(&self.volume_id);
                while id.len() < 32 {
                    id.extend_from_slice(&[0x00, 0x20]);
                }
                id.truncate(32);
                id
            }
        };
        data[off + 40..off + 72].copy_from_slice(&volume_id);

        if tree == Tree::Joliet {
            data[off + 88..off + 91].copy_from_slice(b"%/E");
        }

        let total = (data.len() / BLOCK_SIZE) as u32;
        write_both_endian_u32(&mut data[off + 80..], total);
        write_both_endian_u16(&mut data[off + 128..], BLOCK_SIZE as u16);

        let root_record = dir_record(&[0], root.0, root.1, 0x02, &[]);
        data[off + 156..off + 156 + root_record.len()].copy_from_slice(&root_record);
    }

    fn records(&self, tree: Tree, dir: &DirNode, is_root: bool) -> Vec<(Vec<u8>, RecordRef)> {
        let mut out = Vec::new();
        // mkisofs writes SUSP entries into the primary tree only
        let dot_su: &[u8] = if is_root && self.rock_ridge && tree == Tree::Primary {
            &SP_ENTRY
        } else {
            &[]
        };
        out.push((vec![0u8], RecordRef::SelfDir(dot_su.to_vec())));
        out.push((vec![1u8], RecordRef::Parent));
        for child in &dir.children {
            match child {
                Node::Dir(d) => out.push((identifier(tree, &d.name, true), RecordRef::Dir(d.name.clone()))),
                Node::File { name, .. } => {
                    out.push((identifier(tree, name, false), RecordRef::File(name.clone())))
                }
                Node::Raw(bytes) => out.push((Vec::new(), RecordRef::Raw(bytes.clone()))),
            }
        }
        out
    }

    fn assign_dirs(
        &self,
        tree: Tree,
        dir: &DirNode,
        path: String,
        is_root: bool,
        next: &mut u32,
        out: &mut HashMap<String, (u32, u32)>,
    ) {
        let lens: Vec<usize> = self
            .records(tree, dir, is_root)
            .iter()
            .map(|(id, r)| match r {
                RecordRef::Raw(bytes) => bytes.len(),
                RecordRef::SelfDir(su) => record_len(id.len(), su.len()),
                _ => record_len(id.len(), 0),
            })
            .collect();
        let size = packed_size(&lens);
        out.insert(path.clone(), (*next, size as u32));
        *next += (size / BLOCK_SIZE) as u32;

        for child in &dir.children {
            if let Node::Dir(d) = child {
                self.assign_dirs(tree, d, format!("{}/{}", path, d.name), false, next, out);
            }
        }
    }

    fn assign_files(dir: &DirNode, path: String, next: &mut u32, out: &mut HashMap<String, (u32, u32)>) {
        for child in &dir.children {
            match child {
                Node::File { name, content } => {
                    out.insert(format!("{}/{}", path, name), (*next, content.len() as u32));
                    *next += content.len().div_ceil(BLOCK_SIZE) as u32;
                }
                Node::Dir(d) => Self::assign_files(d, format!("{}/{}", path, d.name), next, out),
                Node::Raw(_) => {}
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn write_dirs(
        &self,
        data: &mut [u8],
        tree: Tree,
        dir: &DirNode,
        path: &str,
        parent: &str,
        dirs: &HashMap<String, (u32, u32)>,
        files: &HashMap<String, (u32, u32)>,
    ) {
        let (lba, size) = dirs[path];
        let (parent_lba, parent_size) = dirs[parent];
        let base = lba as usize * BLOCK_SIZE;
        let mut offset = 0usize;

        for (id, r) in self.records(tree, dir, path.is_empty()) {
            let bytes = match r {
                RecordRef::SelfDir(su) => dir_record(&id, lba, size, 0x02, &su),
                RecordRef::Parent => dir_record(&id, parent_lba, parent_size, 0x02, &[]),
                RecordRef::Dir(name) => {
                    let (l, s) = dirs[&format!("{}/{}", path, name)];
                    dir_record(&id, l, s, 0x02, &[])
                }
                RecordRef::File(name) => {
                    let (l, s) = files[&format!("{}/{}", path, name)];
                    dir_record(&id, l, s, 0x00, &[])
                }
                RecordRef::Raw(bytes) => bytes,
            };
            if offset % BLOCK_SIZE + bytes.len() > BLOCK_SIZE {
                offset = (offset / BLOCK_SIZE + 1) * BLOCK_SIZE;
            }
            data[base + offset..base + offset + bytes.len()].copy_from_slice(&bytes);
            offset += bytes.len();
        }

        for child in &dir.children {
            if let Node::Dir(d) = child {
                let child_path = format!("{}/{}", path, d.name);
                self.write_dirs(data, tree, d, &child_path, path, dirs, files);
            }
        }
    }

    fn write_files(data: &mut [u8], dir: &DirNode, path: String, files: &HashMap<String, (u32, u32)>) {
        for child in &dir.children {
            match child {
                Node::File { name, content } => {
                    let (lba, _) = files[&format!("{}/{}", path, name)];
                    let off = lba as usize * BLOCK_SIZE;
                    data[off..off + content.len()].copy_from_slice(content);
                }
                Node::Dir(d) => Self::write_files(data, d, format!("{}/{}", path, d.name), files),
                Node::Raw(_) => {}
            }
        }
    }
}

enum RecordRef {
    SelfDir(Vec<u8>),
    Parent,
    Dir(String),
    File(String),
    Raw(Vec<u8>),
}

fn utf16_be(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|u| u.to_be_bytes()).collect()
}

fn identifier(tree: Tree, name: &str, is_dir: bool) -> Vec<u8> {
    let name = match tree {
        Tree::Primary => name.to_ascii_uppercase(),
        Tree::Joliet => name.to_string(),
    };
    let name = if is_dir { name } else { format!("{};1", name) };
    match tree {
        Tree::Primary => name.into_bytes(),
        Tree::Joliet => utf16_be(&name),
    }
}

fn record_len(id_len: usize, su_len: usize) -> usize {
    let mut len = 33 + id_len;
    if id_len % 2 == 0 {
        len += 1;
    }
    len + su_len
}

/// Bytes a directory occupies once records are packed without crossing blocks
fn packed_size(lens: &[usize]) -> usize {
    let mut offset = 0usize;
    for &len in lens {
        if offset % BLOCK_SIZE + len > BLOCK_SIZE {
            offset = (offset / BLOCK_SIZE + 1) * BLOCK_SIZE;
        }
        offset += len;
    }
    offset.div_ceil(BLOCK_SIZE).max(1) * BLOCK_SIZE
}

/// Encode one directory record
pub fn dir_record(identifier: &[u8], lba: u32, size: u32, flags: u8, system_use: &[u8]) -> Vec<u8> {
    let len = record_len(identifier.len(), system_use.len());
    let mut rec = vec![0u8; len];
    rec[0] = len as u8;
    write_both_endian_u32(&mut rec[2..], lba);
    write_both_endian_u32(&mut rec[10..], size);
    // 2020-06-15 12:30:00 UTC
    rec[18..25].copy_from_slice(&[120, 6, 15, 12, 30, 0, 0]);
    rec[25] = flags;
    write_both_endian_u16(&mut rec[28..], 1);
    rec[32] = identifier.len() as u8;
    rec[33..33 + identifier.len()].copy_from_slice(identifier);
    let su_start = len - system_use.len();
    rec[su_start..].copy_from_slice(system_use);
    rec
}

fn write_both_endian_u32(dst: &mut [u8], value: u32) {
    dst[0..4].copy_from_slice(&value.to_le_bytes());
    dst[4..8].copy_from_slice(&value.to_be_bytes());
}

fn write_both_endian_u16(dst: &mut [u8], value: u16) {
    dst[0..2].copy_from_slice(&value.to_le_bytes());
    dst[2..4].copy_from_slice(&value.to_be_bytes());
}
