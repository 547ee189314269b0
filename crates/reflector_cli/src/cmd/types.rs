use reflector::reflect::{FieldAccess, Registry};

/// Print registered classes with their fields, then enums and interfaces.
pub fn run(registry: &Registry, json: bool) -> reflector::reflect::Result<()> {
	if json {
		let out = TypesJson {
			classes: registry.class_names().into_iter().filter_map(|name| class_json(registry, name)).collect(),
			enums: registry
				.enum_names()
				.into_iter()
				.filter_map(|name| registry.enum_def(name))
				.map(|def| EnumJson {
					name: def.name.to_string(),
					constants: def.constants.iter().map(ToString::to_string).collect(),
				})
				.collect(),
			interfaces: registry.interface_names().into_iter().map(str::to_owned).collect(),
		};
		println!("{}", serde_json::to_string_pretty(&out)?);
		return Ok(());
	}

	for name in registry.class_names() {
		let Some(def) = registry.class(name) else {
			continue;
		};
		let mut header = format!("class {}", def.name);
		if let Some(parent) = &def.superclass {
			header.push_str(&format!(" extends {parent}"));
		}
		if !def.interfaces.is_empty() {
			let names: Vec<&str> = def.interfaces.iter().map(AsRef::as_ref).collect();
			header.push_str(&format!(" implements {}", names.join(", ")));
		}
		println!("{header}");
		for field in &def.fields {
			println!("  {}: {} ({})", field.name, field.ty, access_label(field.access));
		}
		for method in &def.methods {
			let params: Vec<String> = method.params.iter().map(ToString::to_string).collect();
			println!("  {}({})", method.name, params.join(", "));
		}
	}
	for name in registry.enum_names() {
		if let Some(def) = registry.enum_def(name) {
			let constants: Vec<&str> = def.constants.iter().map(AsRef::as_ref).collect();
			println!("enum {} {{ {} }}", def.name, constants.join(", "));
		}
	}
	for name in registry.interface_names() {
		println!("interface {name}");
	}
	Ok(())
}

fn access_label(access: FieldAccess) -> &'static str {
	match access {
		FieldAccess::Public => "public",
		FieldAccess::Private { override_allowed: true } => "private, overridable",
		FieldAccess::Private { override_allowed: false } => "private",
	}
}

fn class_json(registry: &Registry, name: &str) -> Option<ClassJson> {
	let def = registry.class(name)?;
	Some(ClassJson {
		name: def.name.to_string(),
		superclass: def.superclass.as_deref().map(str::to_owned),
		interfaces: def.interfaces.iter().map(ToString::to_string).collect(),
		fields: def
			.fields
			.iter()
			.map(|field| FieldJson {
				name: field.name.to_string(),
				ty: field.ty.to_string(),
				access: access_label(field.access),
			})
			.collect(),
		methods: def.methods.iter().map(|method| method.name.to_string()).collect(),
	})
}

#[derive(serde::Serialize)]
struct TypesJson {
	classes: Vec<ClassJson>,
	enums: Vec<EnumJson>,
	interfaces: Vec<String>,
}

#[derive(serde::Serialize)]
struct ClassJson {
	name: String,
	superclass: Option<String>,
	interfaces: Vec<String>,
	fields: Vec<FieldJson>,
	methods: Vec<String>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	#[serde(rename = "type")]
	ty: String,
	access: &'static str,
}

#[derive(serde::Serialize)]
struct EnumJson {
	name: String,
	constants: Vec<String>,
}
