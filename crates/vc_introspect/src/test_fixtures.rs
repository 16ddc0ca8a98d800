//! Types shared by the unit tests.

use alloc::format;
use alloc::string::String;

use crate::info::{DescriptorCell, FieldDescriptor, Introspect, MethodDescriptor};
use crate::info::{Modifiers, Type, TypeDescriptor};

// -----------------------------------------------------------------------------
// Entity <- Person <- Employee

pub struct Entity {
    pub id: u64,
    pub revision: u32,
}

impl Introspect for Entity {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::builder::<Self>()
                .field(FieldDescriptor::new::<Self, u64>("id", |e| &e.id, |e| &mut e.id))
                .field(FieldDescriptor::new::<Self, u32>(
                    "revision",
                    |e| &e.revision,
                    |e| &mut e.revision,
                ))
                .field(
                    FieldDescriptor::opaque::<Self, u64>("INSTANCES")
                        .with_modifiers(Modifiers::STATIC),
                )
                .method(MethodDescriptor::getter::<Self, u64>("getId", |e| e.id))
                .method(MethodDescriptor::setter::<Self, u64>("setId", |e, v| e.id = v))
                .method(
                    MethodDescriptor::opaque::<Self>(
                        "getInstanceCount",
                        &[],
                        Some(Type::of::<u64>()),
                    )
                    .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC),
                )
                .build()
        })
    }
}

pub struct Person {
    pub base: Entity,
    pub name: String,
    pub age: u32,
    pub active: bool,
    pub tags: u32,
}

impl Introspect for Person {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::builder::<Self>()
                .extends::<Entity>(|p| &p.base, |p| &mut p.base)
                .field(FieldDescriptor::new::<Self, String>("name", |p| &p.name, |p| &mut p.name))
                .field(FieldDescriptor::new::<Self, u32>("age", |p| &p.age, |p| &mut p.age))
                .field(FieldDescriptor::new::<Self, u32>("tags", |p| &p.tags, |p| &mut p.tags))
                .method(MethodDescriptor::getter::<Self, String>("getName", |p| p.name.clone()))
                .method(MethodDescriptor::setter::<Self, String>("setName", |p, v| p.name = v))
                .method(MethodDescriptor::getter::<Self, u32>("getAge", |p| p.age))
                .method(MethodDescriptor::setter::<Self, u32>("setAge", |p, v| p.age = v))
                .method(MethodDescriptor::setter::<Self, String>("setAge", |p, v| {
                    p.age = v.parse().unwrap_or(p.age);
                }))
                .method(MethodDescriptor::getter::<Self, bool>("isActive", |p| p.active))
                .method(MethodDescriptor::getter::<Self, String>("getURLPath", |p| {
                    format!("/people/{}", p.base.id)
                }))
                .method(MethodDescriptor::getter::<Self, u64>("getId", |p| p.base.id))
                .method(MethodDescriptor::opaque::<Self>("run", &[], None))
                .method(MethodDescriptor::getter::<Self, String>("toString", |p| p.name.clone()))
                .build()
        })
    }
}

pub struct Employee {
    pub base: Person,
    pub department: String,
    pub salary: u64,
}

impl Introspect for Employee {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::builder::<Self>()
                .extends::<Person>(|e| &e.base, |e| &mut e.base)
                .field(FieldDescriptor::new::<Self, String>(
                    "department",
                    |e| &e.department,
                    |e| &mut e.department,
                ))
                .method(MethodDescriptor::getter::<Self, u64>("getSalary", |e| e.salary))
                .property_order(&["name", "id", "department"])
                .build()
        })
    }
}

pub fn employee() -> Employee {
    Employee {
        base: Person {
            base: Entity { id: 7, revision: 3 },
            name: String::from("Ada"),
            age: 36,
            active: true,
            tags: 2,
        },
        department: String::from("Engines"),
        salary: 100,
    }
}

// -----------------------------------------------------------------------------
// Single-member types

pub struct Counter {
    pub count: u32,
}

impl Introspect for Counter {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::builder::<Self>()
                .field(FieldDescriptor::new::<Self, u32>("count", |c| &c.count, |c| &mut c.count))
                .build()
        })
    }
}

pub struct CountView {
    pub count: u32,
}

impl Introspect for CountView {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::builder::<Self>()
                .method(MethodDescriptor::getter::<Self, u32>("getCount", |c| c.count))
                .build()
        })
    }
}

/// Members that overlap or cannot be invoked.
pub struct Gauge {
    pub celsius: f32,
    pub level: u32,
    pub flag: bool,
}

impl Introspect for Gauge {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::builder::<Self>()
                .field(FieldDescriptor::new::<Self, f32>(
                    "celsius",
                    |g| &g.celsius,
                    |g| &mut g.celsius,
                ))
                .field(FieldDescriptor::new::<Self, u32>("level", |g| &g.level, |g| &mut g.level))
                .field(FieldDescriptor::opaque::<Self, u64>("level"))
                .method(MethodDescriptor::opaque::<Self>(
                    "getCelsius",
                    &[],
                    Some(Type::of::<f32>()),
                ))
                .method(MethodDescriptor::getter::<Self, bool>("getFlag", |g| g.flag))
                .method(MethodDescriptor::getter::<Self, bool>("isFlag", |g| !g.flag))
                .method(MethodDescriptor::getter::<Self, u32>("issue", |g| g.level))
                .build()
        })
    }
}

pub fn gauge() -> Gauge {
    Gauge {
        celsius: 21.5,
        level: 4,
        flag: true,
    }
}

// -----------------------------------------------------------------------------
// Malformed chains

/// Parent declared without an upcast.
pub struct Detached {
    pub label: String,
}

impl Introspect for Detached {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::builder::<Self>()
                .extends_descriptor(Entity::type_descriptor)
                .field(FieldDescriptor::new::<Self, String>(
                    "label",
                    |d| &d.label,
                    |d| &mut d.label,
                ))
                .build()
        })
    }
}

pub struct CycleA;

pub struct CycleB;

impl Introspect for CycleA {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::builder::<Self>()
                .extends_descriptor(CycleB::type_descriptor)
                .method(MethodDescriptor::getter::<Self, u8>("getA", |_| 1))
                .build()
        })
    }
}

impl Introspect for CycleB {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: DescriptorCell = DescriptorCell::new();
        CELL.get_or_init(|| {
            TypeDescriptor::builder::<Self>()
                .extends_descriptor(CycleA::type_descriptor)
                .method(MethodDescriptor::getter::<Self, u8>("getB", |_| 2))
                .build()
        })
    }
}
