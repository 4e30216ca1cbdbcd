//! End-to-end generation over parsed source.

use mogen_codegen::{GoFile, MockGen};
use mogen_resolve::{Package, Resolver};

fn generate(src: &str, package_override: Option<&str>) -> GoFile {
    let pkg = Package::from_sources([("x.go", src)]).expect("package");
    let resolver = Resolver::new(pkg).expect("resolver");
    let interfaces = resolver.discover().expect("discover");

    let package = package_override.unwrap_or(resolver.package_name());
    let mut file = GoFile::new(package);
    for path in resolver.import_paths() {
        file.add_import(path);
    }
    for (i, (name, iface)) in interfaces.iter().enumerate() {
        if i > 0 {
            file.body_mut().push_blank();
        }
        let mock = MockGen::new(format!("{name}Mock"), iface).expect("mock");
        mock.write_to(file.body_mut()).expect("write");
    }
    file.generate();
    file
}

const BUFFER_SRC: &str = "package util

type Writer interface {
	Write(p []byte) (n int, err error)
}

type Reader interface {
	Read(p []byte) (n int, err error)
}

type Buffer interface {
	Writer
	Reader
	Reset()
}
";

const BUFFER_WANT: &str = "package util

type BufferMock struct {
	ReadFunc func(p []byte) (n int, err error)
	ResetFunc func()
	WriteFunc func(p []byte) (n int, err error)
}

func (m *BufferMock) Read(p []byte) (n int, err error) {
	if m.ReadFunc != nil {
		return m.ReadFunc(p)
	}
	return 0, nil
}

func (m *BufferMock) Reset() {
	if m.ResetFunc != nil {
		return m.ResetFunc()
	}
	return
}

func (m *BufferMock) Write(p []byte) (n int, err error) {
	if m.WriteFunc != nil {
		return m.WriteFunc(p)
	}
	return 0, nil
}
";

#[test]
fn buffer_round_trip() {
    let mut file = generate(BUFFER_SRC, None);
    file.format().expect("format");
    file.check().expect("check");
    let got = file.contents();

    // Writer and Reader are themselves exported interfaces, so three mocks
    // come out; the Buffer mock must match the flattened, alphabetized form.
    assert!(got.contains("type WriterMock struct {"));
    assert!(got.contains("type ReaderMock struct {"));
    let buffer_at = got.find("type BufferMock struct {").expect("BufferMock");
    let want_buffer = &BUFFER_WANT["package util\n\n".len()..];
    assert_eq!(&got[buffer_at..], want_buffer);
}

#[test]
fn single_interface_output_is_byte_exact() {
    let src = "package util

type Buffer interface {
	Writer
	Reader
	Reset()
}

type Writer interface {
	Write(p []byte) (n int, err error)
}

type Reader interface {
	Read(p []byte) (n int, err error)
}
";
    let pkg = Package::from_sources([("x.go", src)]).expect("package");
    let resolver = Resolver::new(pkg).expect("resolver");
    let interfaces = resolver.discover().expect("discover");
    let (name, iface) = &interfaces[0];
    assert_eq!(name, "Buffer");

    let mut file = GoFile::new(resolver.package_name());
    let mock = MockGen::new(format!("{name}Mock"), iface).expect("mock");
    mock.write_to(file.body_mut()).expect("write");
    file.generate();
    file.format().expect("format");
    file.check().expect("check");
    assert_eq!(file.contents(), BUFFER_WANT);
}

#[test]
fn format_is_idempotent() {
    let mut file = generate(BUFFER_SRC, None);
    file.format().expect("format");
    let first = file.contents().to_owned();
    file.format().expect("format again");
    assert_eq!(file.contents(), first);
}

#[test]
fn unused_source_imports_are_scrubbed() {
    let src = "package util

import (
	\"fmt\"
	\"strings\"
)

func debug(v string) string {
	return fmt.Sprintf(\"%s\", strings.TrimSpace(v))
}

type Nop interface {
}
";
    let mut file = generate(src, None);
    assert!(file.contents().contains("import ("));
    file.format().expect("format");
    file.check().expect("check");
    assert_eq!(
        file.contents(),
        "package util\n\ntype NopMock struct {\n}\n"
    );
}

#[test]
fn qualified_signature_types_keep_their_import() {
    let src = "package util

import \"net/http\"

type Dialer interface {
	Dial() (c http.Client, err error)
}
";
    let mut file = generate(src, None);
    file.format().expect("format");
    file.check().expect("check");
    let got = file.contents();
    assert!(got.contains("import (\n\t\"net/http\"\n)"));
    assert!(got.contains("DialFunc func() (c http.Client, err error)"));
    // Foreign named types have no known underlying form.
    assert!(got.contains("\treturn nil, nil\n"));
}

#[test]
fn package_name_can_be_overridden() {
    let mut file = generate(BUFFER_SRC, Some("util_mock"));
    file.format().expect("format");
    assert!(file.contents().starts_with("package util_mock\n"));
}

#[test]
fn self_referential_interface_round_trip() {
    let src = "package util

type Cloner interface {
	Clone() Cloner
}
";
    let mut file = generate(src, None);
    file.format().expect("format");
    file.check().expect("check");
    let want = "package util

type ClonerMock struct {
	CloneFunc func() Cloner
}

func (m *ClonerMock) Clone() Cloner {
	if m.CloneFunc != nil {
		return m.CloneFunc()
	}
	return nil
}
";
    assert_eq!(file.contents(), want);
}

#[test]
fn variadic_interface_round_trip() {
    let src = "package util

type Logger interface {
	Logf(format string, args ...string)
}
";
    let mut file = generate(src, None);
    file.format().expect("format");
    file.check().expect("check");
    let want = "package util

type LoggerMock struct {
	LogfFunc func(format string, args ...string)
}

func (m *LoggerMock) Logf(format string, args ...string) {
	if m.LogfFunc != nil {
		return m.LogfFunc(format, args...)
	}
	return
}
";
    assert_eq!(file.contents(), want);
}
