use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::reflect::coerce::assign_compatible;
use crate::reflect::naming::{AccessorKind, CodingStyle, accessor_name};
use crate::reflect::{EnumValue, ObjectValue, ReflectError, Result, TypeDesc, Value};

/// Setter body: receives the target instance and the argument.
pub type SetterFn = dyn Fn(&mut ObjectValue, Value) -> Result<()> + Send + Sync;
/// Getter body: reads from the target instance.
pub type GetterFn = dyn Fn(&ObjectValue) -> Result<Value> + Send + Sync;
/// No-argument constructor body.
pub type ConstructorFn = dyn Fn() -> ObjectValue + Send + Sync;

/// Write visibility of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccess {
	/// Directly assignable.
	Public,
	/// Hidden; `override_allowed` lets the injector write it after an explicit
	/// accessibility override.
	Private {
		/// Owner opted this field into override writes.
		override_allowed: bool,
	},
}

/// One declared field.
#[derive(Debug, Clone)]
pub struct FieldDef {
	/// Field name.
	pub name: Box<str>,
	/// Declared type.
	pub ty: TypeDesc,
	/// Visibility.
	pub access: FieldAccess,
}

#[derive(Clone)]
enum MethodBody {
	Setter(Arc<SetterFn>),
	Getter(Arc<GetterFn>),
}

/// One accessor method.
#[derive(Clone)]
pub struct MethodDef {
	/// Method name.
	pub name: Box<str>,
	/// Declared parameter types.
	pub params: Vec<TypeDesc>,
	/// Declared return type for getters.
	pub returns: Option<TypeDesc>,
	body: MethodBody,
}

impl fmt::Debug for MethodDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MethodDef")
			.field("name", &self.name)
			.field("params", &self.params)
			.field("returns", &self.returns)
			.finish_non_exhaustive()
	}
}

impl MethodDef {
	/// One-parameter setter with a custom body.
	pub fn setter(name: &str, param: TypeDesc, body: impl Fn(&mut ObjectValue, Value) -> Result<()> + Send + Sync + 'static) -> Self {
		Self {
			name: name.into(),
			params: vec![param],
			returns: None,
			body: MethodBody::Setter(Arc::new(body)),
		}
	}

	/// Zero-parameter getter with a custom body.
	pub fn getter(name: &str, returns: TypeDesc, body: impl Fn(&ObjectValue) -> Result<Value> + Send + Sync + 'static) -> Self {
		Self {
			name: name.into(),
			params: Vec::new(),
			returns: Some(returns),
			body: MethodBody::Getter(Arc::new(body)),
		}
	}

	/// Setter that stores its argument into `field`.
	pub fn field_setter(name: &str, param: TypeDesc, field: &str) -> Self {
		let field = field.to_owned();
		Self::setter(name, param, move |object, value| object.set(&field, value))
	}

	/// Getter that returns the current value of `field`.
	pub fn field_getter(name: &str, returns: TypeDesc, field: &str) -> Self {
		let field = field.to_owned();
		Self::getter(name, returns, move |object| {
			object.get(&field).cloned().ok_or_else(|| ReflectError::FieldNotFound {
				class_name: object.class_name.to_string(),
				field: field.clone(),
			})
		})
	}

	/// Whether this reads or writes.
	pub fn kind(&self) -> AccessorKind {
		match self.body {
			MethodBody::Setter(_) => AccessorKind::Set,
			MethodBody::Getter(_) => AccessorKind::Get,
		}
	}

	/// Invoke a setter. The argument must be assignable to the declared
	/// parameter type; otherwise `TypeMismatch` is returned and nothing runs.
	pub fn invoke_set(&self, registry: &Registry, object: &mut ObjectValue, value: Value) -> Result<()> {
		let MethodBody::Setter(body) = &self.body else {
			return Err(self.invocation_error("not a setter"));
		};
		let [param] = self.params.as_slice() else {
			return Err(self.invocation_error("setter must take exactly one parameter"));
		};
		let got = value.kind_name();
		let argument = assign_compatible(registry, &value, param).ok_or_else(|| ReflectError::TypeMismatch {
			expected: param.to_string(),
			got,
		})?;
		body(object, argument).map_err(|err| match err {
			ReflectError::Invocation { .. } => err,
			other => self.invocation_error(&other.to_string()),
		})
	}

	/// Invoke a getter.
	pub fn invoke_get(&self, object: &ObjectValue) -> Result<Value> {
		let MethodBody::Getter(body) = &self.body else {
			return Err(self.invocation_error("not a getter"));
		};
		body(object)
	}

	fn invocation_error(&self, reason: &str) -> ReflectError {
		ReflectError::Invocation {
			method: self.name.to_string(),
			reason: reason.to_owned(),
		}
	}
}

/// How a class obtains its no-argument constructor.
#[derive(Clone, Default)]
pub enum Constructor {
	/// Built-in no-argument constructor; fields start at their defaults.
	#[default]
	Implicit,
	/// Custom no-argument constructor.
	Custom(Arc<ConstructorFn>),
	/// Reuse the nearest superclass constructor.
	Inherited,
	/// Only constructors with arguments exist.
	None,
}

impl fmt::Debug for Constructor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Constructor::Implicit => f.write_str("Implicit"),
			Constructor::Custom(_) => f.write_str("Custom(..)"),
			Constructor::Inherited => f.write_str("Inherited"),
			Constructor::None => f.write_str("None"),
		}
	}
}

/// Registered class: the capability table entry for one type.
#[derive(Debug, Clone)]
pub struct ClassDef {
	/// Class name.
	pub name: Box<str>,
	/// Direct superclass name.
	pub superclass: Option<Box<str>>,
	/// Directly implemented interface names.
	pub interfaces: Vec<Box<str>>,
	/// Declared fields in source order.
	pub fields: Vec<FieldDef>,
	/// Declared methods in source order.
	pub methods: Vec<MethodDef>,
	/// Constructor capability.
	pub constructor: Constructor,
	unresolved_accessors: Vec<Box<str>>,
}

impl ClassDef {
	/// Start declaring a class.
	pub fn builder(name: &str) -> ClassBuilder {
		ClassBuilder {
			def: ClassDef {
				name: name.into(),
				superclass: None,
				interfaces: Vec::new(),
				fields: Vec::new(),
				methods: Vec::new(),
				constructor: Constructor::Implicit,
				unresolved_accessors: Vec::new(),
			},
		}
	}

	/// Declared field by name.
	pub fn field(&self, name: &str) -> Option<&FieldDef> {
		self.fields.iter().find(|field| field.name.as_ref() == name)
	}

	/// Declared methods with the given name, in declaration order.
	pub fn methods_named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a MethodDef> + use<'a, 'n> {
		self.methods.iter().filter(move |method| method.name.as_ref() == name)
	}
}

/// Fluent [`ClassDef`] builder.
#[derive(Debug)]
pub struct ClassBuilder {
	def: ClassDef,
}

impl ClassBuilder {
	/// Set the direct superclass.
	pub fn extends(mut self, superclass: &str) -> Self {
		self.def.superclass = Some(superclass.into());
		self
	}

	/// Add an implemented interface.
	pub fn implements(mut self, interface: &str) -> Self {
		self.def.interfaces.push(interface.into());
		self
	}

	/// Add a public field.
	pub fn field(self, name: &str, ty: TypeDesc) -> Self {
		self.field_with_access(name, ty, FieldAccess::Public)
	}

	/// Add a private field reachable only through accessors.
	pub fn private_field(self, name: &str, ty: TypeDesc) -> Self {
		self.field_with_access(name, ty, FieldAccess::Private { override_allowed: false })
	}

	/// Add a private field the injector may write after an accessibility override.
	pub fn overridable_field(self, name: &str, ty: TypeDesc) -> Self {
		self.field_with_access(name, ty, FieldAccess::Private { override_allowed: true })
	}

	/// Add a field with explicit access.
	pub fn field_with_access(mut self, name: &str, ty: TypeDesc, access: FieldAccess) -> Self {
		self.def.fields.push(FieldDef {
			name: name.into(),
			ty,
			access,
		});
		self
	}

	/// Add a method.
	pub fn method(mut self, method: MethodDef) -> Self {
		self.def.methods.push(method);
		self
	}

	/// Add a getter/setter pair for an already declared field, named per `style`.
	///
	/// A field not declared yet is remembered and rejected by
	/// [`RegistryBuilder::build`] with `FieldNotFound`.
	pub fn accessors(mut self, field: &str, style: CodingStyle) -> Self {
		let Some(ty) = self.def.field(field).map(|item| item.ty.clone()) else {
			self.def.unresolved_accessors.push(field.into());
			return self;
		};
		let setter = MethodDef::field_setter(&accessor_name(field, style, AccessorKind::Set), ty.clone(), field);
		let getter = MethodDef::field_getter(&accessor_name(field, style, AccessorKind::Get), ty, field);
		self.method(setter).method(getter)
	}

	/// Use a custom no-argument constructor.
	pub fn constructor(mut self, body: impl Fn() -> ObjectValue + Send + Sync + 'static) -> Self {
		self.def.constructor = Constructor::Custom(Arc::new(body));
		self
	}

	/// Reuse the superclass constructor.
	pub fn inherit_constructor(mut self) -> Self {
		self.def.constructor = Constructor::Inherited;
		self
	}

	/// Declare that no no-argument constructor exists.
	pub fn without_default_constructor(mut self) -> Self {
		self.def.constructor = Constructor::None;
		self
	}

	/// Finish the declaration.
	pub fn build(self) -> ClassDef {
		self.def
	}
}

/// Registered enum.
#[derive(Debug, Clone)]
pub struct EnumDef {
	/// Enum name.
	pub name: Box<str>,
	/// Constant names in declaration order.
	pub constants: Vec<Box<str>>,
}

impl EnumDef {
	/// Declare an enum.
	pub fn new<'a>(name: &str, constants: impl IntoIterator<Item = &'a str>) -> Self {
		Self {
			name: name.into(),
			constants: constants.into_iter().map(Into::into).collect(),
		}
	}

	/// Constant matched by exact, case-sensitive name.
	pub fn constant(&self, name: &str) -> Option<EnumValue> {
		let ordinal = self.constants.iter().position(|item| item.as_ref() == name)?;
		self.constant_at(ordinal)
	}

	/// Constant at declaration index.
	pub fn constant_at(&self, ordinal: usize) -> Option<EnumValue> {
		self.constants.get(ordinal).map(|constant| EnumValue {
			type_name: self.name.clone(),
			constant: constant.clone(),
			ordinal,
		})
	}
}

/// Statically registered type capabilities.
#[derive(Debug, Default)]
pub struct Registry {
	classes: HashMap<Box<str>, ClassDef>,
	enums: HashMap<Box<str>, EnumDef>,
	interfaces: HashSet<Box<str>>,
}

/// Collects declarations and validates them into a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
	classes: Vec<ClassDef>,
	enums: Vec<EnumDef>,
	interfaces: Vec<Box<str>>,
}

impl RegistryBuilder {
	/// Register a class.
	pub fn class(mut self, def: ClassDef) -> Self {
		self.classes.push(def);
		self
	}

	/// Register an enum.
	pub fn enumeration(mut self, def: EnumDef) -> Self {
		self.enums.push(def);
		self
	}

	/// Register an interface name.
	pub fn interface(mut self, name: &str) -> Self {
		self.interfaces.push(name.into());
		self
	}

	/// Validate names, accessor targets, superclasses, and interfaces.
	pub fn build(self) -> Result<Registry> {
		let mut seen: HashSet<Box<str>> = HashSet::new();
		let names = self
			.classes
			.iter()
			.map(|item| &item.name)
			.chain(self.enums.iter().map(|item| &item.name))
			.chain(self.interfaces.iter());
		for name in names {
			if TypeDesc::basic(name).is_some() || !seen.insert(name.clone()) {
				return Err(ReflectError::DuplicateType { name: name.to_string() });
			}
		}

		let registry = Registry {
			classes: self.classes.into_iter().map(|item| (item.name.clone(), item)).collect(),
			enums: self.enums.into_iter().map(|item| (item.name.clone(), item)).collect(),
			interfaces: self.interfaces.into_iter().collect(),
		};

		for def in registry.classes.values() {
			if let Some(field) = def.unresolved_accessors.first() {
				return Err(ReflectError::FieldNotFound {
					class_name: def.name.to_string(),
					field: field.to_string(),
				});
			}
			if let Some(parent) = &def.superclass {
				if !registry.classes.contains_key(parent) {
					return Err(ReflectError::ClassNotFound { name: parent.to_string() });
				}
			}
			for interface in &def.interfaces {
				if !registry.interfaces.contains(interface) {
					return Err(ReflectError::UnknownType { name: interface.to_string() });
				}
			}
			registry.class_chain(&def.name)?;
		}

		Ok(registry)
	}
}

impl Registry {
	/// Start collecting declarations.
	pub fn builder() -> RegistryBuilder {
		RegistryBuilder::default()
	}

	/// Class by name.
	pub fn class(&self, name: &str) -> Option<&ClassDef> {
		self.classes.get(name)
	}

	/// Enum by name.
	pub fn enum_def(&self, name: &str) -> Option<&EnumDef> {
		self.enums.get(name)
	}

	/// Whether `name` is a registered interface.
	pub fn is_interface(&self, name: &str) -> bool {
		self.interfaces.contains(name)
	}

	/// Descriptor for a registered class, enum, or interface name.
	pub fn resolve_type(&self, name: &str) -> Option<TypeDesc> {
		if self.classes.contains_key(name) {
			Some(TypeDesc::Class(name.into()))
		} else if self.enums.contains_key(name) {
			Some(TypeDesc::Enum(name.into()))
		} else if self.interfaces.contains(name) {
			Some(TypeDesc::Interface(name.into()))
		} else {
			None
		}
	}

	/// The class followed by its superclasses, nearest first.
	pub fn class_chain(&self, name: &str) -> Result<Vec<&ClassDef>> {
		let mut chain = Vec::new();
		let mut current = Some(name);
		while let Some(item) = current {
			let def = self.class(item).ok_or_else(|| ReflectError::ClassNotFound { name: item.to_owned() })?;
			if chain.iter().any(|seen: &&ClassDef| seen.name == def.name) {
				return Err(ReflectError::InheritanceCycle { name: name.to_owned() });
			}
			chain.push(def);
			current = def.superclass.as_deref();
		}
		Ok(chain)
	}

	/// Every field of the class chain, superclass fields first.
	pub fn all_fields(&self, name: &str) -> Result<Vec<&FieldDef>> {
		let chain = self.class_chain(name)?;
		Ok(chain.into_iter().rev().flat_map(|def| def.fields.iter()).collect())
	}

	/// Field by name, searching the class chain nearest first.
	pub fn find_field(&self, class_name: &str, field: &str) -> Result<Option<&FieldDef>> {
		Ok(self.class_chain(class_name)?.into_iter().find_map(|def| def.field(field)))
	}

	/// Methods named `method`, declared on the class and optionally its superclasses.
	pub fn find_methods(&self, class_name: &str, method: &str, search_superclasses: bool) -> Result<Vec<&MethodDef>> {
		let chain = self.class_chain(class_name)?;
		let take = if search_superclasses { chain.len() } else { 1 };
		Ok(chain.into_iter().take(take).flat_map(|def| def.methods_named(method)).collect())
	}

	/// Whether `class_name` is `ancestor` or derives from it.
	pub fn is_subclass_of(&self, class_name: &str, ancestor: &str) -> bool {
		self.class_chain(class_name)
			.map(|chain| chain.iter().any(|def| def.name.as_ref() == ancestor))
			.unwrap_or(false)
	}

	/// Whether `class_name` or one of its superclasses implements `interface`.
	pub fn implements(&self, class_name: &str, interface: &str) -> bool {
		self.class_chain(class_name)
			.map(|chain| chain.iter().any(|def| def.interfaces.iter().any(|item| item.as_ref() == interface)))
			.unwrap_or(false)
	}

	/// Registered class names, sorted.
	pub fn class_names(&self) -> Vec<&str> {
		sorted_names(self.classes.keys())
	}

	/// Registered enum names, sorted.
	pub fn enum_names(&self) -> Vec<&str> {
		sorted_names(self.enums.keys())
	}

	/// Registered interface names, sorted.
	pub fn interface_names(&self) -> Vec<&str> {
		sorted_names(self.interfaces.iter())
	}
}

fn sorted_names<'a>(names: impl Iterator<Item = &'a Box<str>>) -> Vec<&'a str> {
	let mut out: Vec<&str> = names.map(AsRef::as_ref).collect();
	out.sort_unstable();
	out
}

#[cfg(test)]
mod tests;
