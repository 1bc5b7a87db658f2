//! Whole-file designs through parse, serialize and the diagnostics pass.

use std::path::PathBuf;
use vesta_diagnostics::{DiagnosticCode, DiagnosticSink};
use vesta_source::{FileId, SourceFile};
use vesta_vhdl::{
    parse_source, AsynchronousBlock, HeadStatement, PackageBodyBlock, VhdlFile, VhdlNode,
};

const REGFILE: &str = "\
-- Single-entry register with bypass
library ieee;
use ieee.std_logic_1164.all;
use ieee.numeric_std.all;

package regs_pkg is
    constant DEPTH: natural := 4;
    type mode_t is (READ, WRITE);
    function parity(v: std_logic_vector(7 downto 0)) return std_logic;
end package regs_pkg;

package body regs_pkg is
    function parity(v: std_logic_vector(7 downto 0)) return std_logic is
        variable p: std_logic := '0';
    begin
        for i in 0 to 7 loop
            p := p xor v(i);
        end loop;
        return p;
    end function parity;
end package body regs_pkg;

entity regfile is
    generic (
        WIDTH: natural := 8
    );
    port (
        clk: in std_logic; -- rising edge
        we: in std_logic;
        din: in std_logic_vector(WIDTH - 1 downto 0);
        dout: out std_logic_vector(WIDTH - 1 downto 0)
    );
end entity regfile;

architecture rtl of regfile is
    signal data_r: std_logic_vector(WIDTH - 1 downto 0);
begin
    dout <= data_r when we = '0' else din;
    store: process(clk)
    begin
        if rising_edge(clk) then
            if we = '1' then
                data_r <= din;
            end if;
        end if;
    end process store;
end architecture rtl;";

#[test]
fn canonical_design_roundtrips_exactly() {
    let file = VhdlFile::parse(REGFILE).unwrap();
    assert_eq!(file.header.len(), 1);
    assert_eq!(file.includes.len(), 3);
    assert_eq!(file.packages.len(), 1);
    assert_eq!(file.package_bodies.len(), 1);
    assert_eq!(file.entities.len(), 1);
    assert_eq!(file.architectures.len(), 1);
    assert_eq!(file.serialize(), REGFILE);
}

#[test]
fn design_structure() {
    let file = VhdlFile::parse(REGFILE).unwrap();

    let package = &file.packages[0];
    assert!(matches!(
        package.statements()[2],
        HeadStatement::FunctionDeclaration(_)
    ));
    assert!(matches!(file.package_bodies[0].body, PackageBodyBlock::Function(_)));

    let ports = file.entities[0].ports.as_ref().unwrap();
    assert_eq!(ports.signals().len(), 4);
    assert_eq!(ports.signals()[0].comment.as_ref().unwrap().text, " rising edge");

    let arch = &file.architectures[0];
    assert!(arch.entity.matches("REGFILE"));
    let body = arch.body.elements();
    assert_eq!(body.len(), 2);
    assert!(matches!(body[1], AsynchronousBlock::Process(_)));
}

#[test]
fn loose_source_is_canonicalized() {
    let loose = "ENTITY inv IS PORT (a: IN bit; y : OUT bit); END inv;\n\
                 ARCHITECTURE rtl OF inv IS BEGIN y <= not a; END rtl;";
    let expected = "\
entity inv is
    port (
        a: in bit;
        y: out bit
    );
end entity inv;

architecture rtl of inv is
begin
    y <= not a;
end architecture rtl;";
    let file = VhdlFile::parse(loose).unwrap();
    assert_eq!(file.serialize(), expected);
    assert_eq!(VhdlFile::parse(expected), Some(file));
}

#[test]
fn serialization_is_a_fixpoint() {
    let once = VhdlFile::parse(REGFILE).unwrap().serialize();
    let twice = VhdlFile::parse(&once).unwrap().serialize();
    assert_eq!(once, twice);
}

#[test]
fn ast_survives_json() {
    let file = VhdlFile::parse(REGFILE).unwrap();
    let json = serde_json::to_string(&file).unwrap();
    let back: VhdlFile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, file);
    assert_eq!(back.serialize(), REGFILE);
}

#[test]
fn diagnostics_point_at_broken_units() {
    let text = REGFILE.replace("end package regs_pkg;", "end package other;");
    let file = SourceFile::new(FileId::from_raw(3), PathBuf::from("regs.vhd"), text);
    let sink = DiagnosticSink::new();
    assert!(parse_source(&file, &sink).is_none());
    let diagnostics = sink.take_all();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::MalformedUnit);
    let span = diagnostics[0].span.unwrap();
    assert_eq!(span.file, FileId::from_raw(3));
    assert!(file.slice(span).unwrap().starts_with("package regs_pkg is"));
    assert_eq!(file.line_col(span.start), (6, 1));
}
