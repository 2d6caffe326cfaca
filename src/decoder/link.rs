//! Reference resolution: rewrites raw handle references into arena indices
//! and reconstructs the owned entity chains of pre-2004 files.

use crate::document::{DocumentGraph, DwgObject, ObjectRef, ObjectVariant};
use crate::entities::EntityCommon;
use crate::notification::NotificationType;
use crate::objects::TableRecordCommon;
use crate::types::Handle;

/// Resolve every reference in the graph and fill the owned chains.
///
/// Unresolvable handles become [`ObjectRef::Dangling`] and are reported
/// once each; the objects holding them stay usable.
pub(super) fn link_graph(graph: &mut DocumentGraph) {
    let mut dangling: Vec<Handle> = Vec::new();

    {
        let index = &graph.handle_index;
        for object in graph.objects.iter_mut() {
            visit_refs(object, &mut |r| {
                if let ObjectRef::Unresolved(handle) = *r {
                    *r = match index.get(&handle) {
                        Some(&i) => ObjectRef::Index(i),
                        None => {
                            dangling.push(handle);
                            ObjectRef::Dangling(handle)
                        }
                    };
                }
            });
        }
    }

    dangling.sort_unstable();
    dangling.dedup();
    for handle in dangling {
        graph.notifications.notify(
            NotificationType::Warning,
            format!("reference to missing object {handle:#x}"),
        );
    }

    fill_entity_chains(graph);
}

/// Apply `f` to every reference the object holds, header and body alike.
fn visit_refs(object: &mut DwgObject, f: &mut impl FnMut(&mut ObjectRef)) {
    f(&mut object.header.owner);
    for r in object.header.reactors.iter_mut() {
        f(r);
    }
    f(&mut object.header.xdictionary);
    for group in object.header.eed.iter_mut() {
        f(&mut group.app_id);
    }

    let common = |c: &mut EntityCommon, f: &mut dyn FnMut(&mut ObjectRef)| {
        f(&mut c.layer);
        f(&mut c.linetype);
        f(&mut c.plotstyle);
        f(&mut c.prev_entity);
        f(&mut c.next_entity);
    };
    let record = |r: &mut TableRecordCommon, f: &mut dyn FnMut(&mut ObjectRef)| {
        f(&mut r.xref);
        f(&mut r.control);
    };

    use ObjectVariant::*;
    match &mut object.variant {
        Text(e) => {
            common(&mut e.common, f);
            f(&mut e.style);
        }
        Attrib(e) => {
            common(&mut e.text.common, f);
            f(&mut e.text.style);
        }
        Attdef(e) => {
            common(&mut e.text.common, f);
            f(&mut e.text.style);
        }
        Block(e) => common(&mut e.common, f),
        EndBlock(e) => common(&mut e.common, f),
        SeqEnd(e) => common(&mut e.common, f),
        Insert(e) => {
            common(&mut e.common, f);
            f(&mut e.block_header);
            f(&mut e.first_attribute);
            f(&mut e.last_attribute);
            for r in e.attributes.iter_mut() {
                f(r);
            }
            f(&mut e.seqend);
        }
        Vertex2D(e) => common(&mut e.common, f),
        Vertex3D(e) => common(&mut e.common, f),
        VertexPfaceFace(e) => common(&mut e.common, f),
        Polyline2D(e) => {
            common(&mut e.common, f);
            f(&mut e.first_vertex);
            f(&mut e.last_vertex);
            for r in e.vertices.iter_mut() {
                f(r);
            }
            f(&mut e.seqend);
        }
        Polyline3D(e) => {
            common(&mut e.common, f);
            f(&mut e.first_vertex);
            f(&mut e.last_vertex);
            for r in e.vertices.iter_mut() {
                f(r);
            }
            f(&mut e.seqend);
        }
        PolyfaceMesh(e) => {
            common(&mut e.common, f);
            f(&mut e.first_vertex);
            f(&mut e.last_vertex);
            for r in e.vertices.iter_mut() {
                f(r);
            }
            f(&mut e.seqend);
        }
        PolygonMesh(e) => {
            common(&mut e.common, f);
            f(&mut e.first_vertex);
            f(&mut e.last_vertex);
            for r in e.vertices.iter_mut() {
                f(r);
            }
            f(&mut e.seqend);
        }
        Arc(e) => common(&mut e.common, f),
        Circle(e) => common(&mut e.common, f),
        Line(e) => common(&mut e.common, f),
        Dimension(e) => {
            common(&mut e.common, f);
            f(&mut e.dim_style);
            f(&mut e.block);
        }
        Point(e) => common(&mut e.common, f),
        Face3D(e) => common(&mut e.common, f),
        Solid(e) | Trace(e) => common(&mut e.common, f),
        Shape(e) => {
            common(&mut e.common, f);
            f(&mut e.style);
        }
        Viewport(e) => {
            common(&mut e.common, f);
            for r in e.frozen_layers.iter_mut() {
                f(r);
            }
            f(&mut e.boundary);
            f(&mut e.named_ucs);
            f(&mut e.base_ucs);
        }
        Ellipse(e) => common(&mut e.common, f),
        Spline(e) => common(&mut e.common, f),
        Region(e) | Solid3D(e) | Body(e) => common(&mut e.common, f),
        Ray(e) => common(&mut e.common, f),
        XLine(e) => common(&mut e.common, f),
        MText(e) => {
            common(&mut e.common, f);
            f(&mut e.style);
        }
        Leader(e) => {
            common(&mut e.common, f);
            f(&mut e.annotation);
            f(&mut e.dim_style);
        }
        Tolerance(e) => {
            common(&mut e.common, f);
            f(&mut e.dim_style);
        }
        MLine(e) => {
            common(&mut e.common, f);
            f(&mut e.style);
        }
        LwPolyline(e) => common(&mut e.common, f),
        Hatch(e) => {
            common(&mut e.common, f);
            for path in e.paths.iter_mut() {
                for r in path.source_entities.iter_mut() {
                    f(r);
                }
            }
        }
        Ole2Frame(e) => common(&mut e.common, f),
        UnknownEntity(e) => common(&mut e.common, f),

        TableControl(o) => {
            for r in o.entries.iter_mut() {
                f(r);
            }
            f(&mut o.model_space);
            f(&mut o.paper_space);
            f(&mut o.bylayer);
            f(&mut o.byblock);
        }
        BlockHeader(o) => {
            record(&mut o.record, f);
            f(&mut o.block_entity);
            f(&mut o.first_entity);
            f(&mut o.last_entity);
            for r in o.entities.iter_mut() {
                f(r);
            }
            f(&mut o.end_block_entity);
            for r in o.inserts.iter_mut() {
                f(r);
            }
            f(&mut o.layout);
        }
        Layer(o) => {
            record(&mut o.record, f);
            f(&mut o.plotstyle);
            f(&mut o.linetype);
        }
        TextStyle(o) => record(&mut o.record, f),
        LineType(o) => {
            record(&mut o.record, f);
            for dash in o.dashes.iter_mut() {
                f(&mut dash.style);
            }
        }
        View(o) => {
            record(&mut o.record, f);
            f(&mut o.base_ucs);
            f(&mut o.named_ucs);
        }
        Ucs(o) => {
            record(&mut o.record, f);
            f(&mut o.base_ucs);
            f(&mut o.named_ucs);
        }
        VPort(o) => {
            record(&mut o.record, f);
            f(&mut o.named_ucs);
            f(&mut o.base_ucs);
        }
        AppId(o) => record(&mut o.record, f),
        DimStyle(o) => {
            record(&mut o.record, f);
            f(&mut o.text_style);
            f(&mut o.leader_arrow);
            f(&mut o.arrow_block);
            f(&mut o.arrow_block1);
            f(&mut o.arrow_block2);
        }
        VpEntityHeader(o) => {
            record(&mut o.record, f);
            f(&mut o.viewport_entity);
        }

        Dictionary(o) => {
            for (_, r) in o.entries.iter_mut() {
                f(r);
            }
        }
        Group(o) => {
            for r in o.members.iter_mut() {
                f(r);
            }
        }
        Layout(o) => {
            f(&mut o.paper_space_block);
            f(&mut o.active_viewport);
            f(&mut o.base_ucs);
            f(&mut o.named_ucs);
            for r in o.viewports.iter_mut() {
                f(r);
            }
        }
        MLineStyle(_) | XRecord(_) | Placeholder | UnknownObject(_) | Errored { .. } => {}
    }
}

/// The shared entity block of a graphical entity, if this object is one.
fn entity_common(object: &DwgObject) -> Option<&EntityCommon> {
    use ObjectVariant::*;
    match &object.variant {
        Text(e) => Some(&e.common),
        Attrib(e) => Some(&e.text.common),
        Attdef(e) => Some(&e.text.common),
        Block(e) => Some(&e.common),
        EndBlock(e) => Some(&e.common),
        SeqEnd(e) => Some(&e.common),
        Insert(e) => Some(&e.common),
        Vertex2D(e) => Some(&e.common),
        Vertex3D(e) => Some(&e.common),
        VertexPfaceFace(e) => Some(&e.common),
        Polyline2D(e) => Some(&e.common),
        Polyline3D(e) => Some(&e.common),
        PolyfaceMesh(e) => Some(&e.common),
        PolygonMesh(e) => Some(&e.common),
        Arc(e) => Some(&e.common),
        Circle(e) => Some(&e.common),
        Line(e) => Some(&e.common),
        Dimension(e) => Some(&e.common),
        Point(e) => Some(&e.common),
        Face3D(e) => Some(&e.common),
        Solid(e) | Trace(e) => Some(&e.common),
        Shape(e) => Some(&e.common),
        Viewport(e) => Some(&e.common),
        Ellipse(e) => Some(&e.common),
        Spline(e) => Some(&e.common),
        Region(e) | Solid3D(e) | Body(e) => Some(&e.common),
        Ray(e) => Some(&e.common),
        XLine(e) => Some(&e.common),
        MText(e) => Some(&e.common),
        Leader(e) => Some(&e.common),
        Tolerance(e) => Some(&e.common),
        MLine(e) => Some(&e.common),
        LwPolyline(e) => Some(&e.common),
        Hatch(e) => Some(&e.common),
        Ole2Frame(e) => Some(&e.common),
        UnknownEntity(e) => Some(&e.common),
        _ => None,
    }
}

/// Walk the sibling chain from `first` to `last`, collecting indices.
///
/// A broken chain (dangling link, cycle) stops the walk; whatever was
/// collected up to that point is kept.
fn collect_chain(graph: &DocumentGraph, first: ObjectRef, last: ObjectRef) -> Vec<ObjectRef> {
    let mut members = Vec::new();
    let Some(mut current) = first.index() else {
        return members;
    };
    // A chain can never be longer than the arena.
    for _ in 0..graph.objects.len() {
        members.push(ObjectRef::Index(current));
        if Some(current) == last.index() {
            return members;
        }
        let next = graph
            .objects
            .get(current)
            .and_then(entity_common)
            .map(|c| c.next_entity);
        match next.and_then(|r| r.index()) {
            Some(i) => current = i,
            None => break,
        }
    }
    members
}

/// Fill the `vertices`, `attributes` and block `entities` lists of the
/// pre-2004 linked chains.
fn fill_entity_chains(graph: &mut DocumentGraph) {
    for i in 0..graph.objects.len() {
        let chain = match &graph.objects[i].variant {
            ObjectVariant::Polyline2D(p) => collect_chain(graph, p.first_vertex, p.last_vertex),
            ObjectVariant::Polyline3D(p) => collect_chain(graph, p.first_vertex, p.last_vertex),
            ObjectVariant::PolyfaceMesh(p) => collect_chain(graph, p.first_vertex, p.last_vertex),
            ObjectVariant::PolygonMesh(p) => collect_chain(graph, p.first_vertex, p.last_vertex),
            ObjectVariant::Insert(e) if e.has_attributes => {
                collect_chain(graph, e.first_attribute, e.last_attribute)
            }
            ObjectVariant::BlockHeader(b) if b.entities.is_empty() => {
                collect_chain(graph, b.first_entity, b.last_entity)
            }
            _ => continue,
        };

        match &mut graph.objects[i].variant {
            ObjectVariant::Polyline2D(p) => p.vertices = chain,
            ObjectVariant::Polyline3D(p) => p.vertices = chain,
            ObjectVariant::PolyfaceMesh(p) => p.vertices = chain,
            ObjectVariant::PolygonMesh(p) => p.vertices = chain,
            ObjectVariant::Insert(e) => e.attributes = chain,
            ObjectVariant::BlockHeader(b) => b.entities = chain,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ObjectHeader;
    use crate::entities::{Circle, SeqEnd, Vertex2D};
    use crate::types::FileVersion;

    fn unresolved(handle: u64) -> ObjectRef {
        ObjectRef::Unresolved(Handle::new(handle))
    }

    fn entity_at(next: ObjectRef) -> DwgObject {
        let mut v = Vertex2D::default();
        v.common.next_entity = next;
        DwgObject {
            header: ObjectHeader::default(),
            variant: ObjectVariant::Vertex2D(v),
        }
    }

    fn graph_with(objects: Vec<DwgObject>) -> DocumentGraph {
        let mut graph = DocumentGraph::new(FileVersion::Ac1015);
        for (i, mut object) in objects.into_iter().enumerate() {
            object.header.handle = Handle::new((i + 1) as u64);
            graph.handle_index.insert(object.header.handle, i);
            graph.objects.push(object);
        }
        graph
    }

    #[test]
    fn unresolved_refs_become_indices() {
        let mut circle = Circle::default();
        circle.common.layer = unresolved(2);
        let mut graph = graph_with(vec![
            DwgObject {
                header: ObjectHeader::default(),
                variant: ObjectVariant::Circle(circle),
            },
            DwgObject {
                header: ObjectHeader::default(),
                variant: ObjectVariant::Placeholder,
            },
        ]);

        link_graph(&mut graph);

        match &graph.objects[0].variant {
            ObjectVariant::Circle(c) => assert_eq!(c.common.layer, ObjectRef::Index(1)),
            _ => panic!("expected circle"),
        }
    }

    #[test]
    fn missing_handles_become_dangling() {
        let mut circle = Circle::default();
        circle.common.layer = unresolved(0x99);
        let mut graph = graph_with(vec![DwgObject {
            header: ObjectHeader::default(),
            variant: ObjectVariant::Circle(circle),
        }]);

        link_graph(&mut graph);

        match &graph.objects[0].variant {
            ObjectVariant::Circle(c) => assert_eq!(c.common.layer, ObjectRef::Dangling(Handle::new(0x99))),
            _ => panic!("expected circle"),
        }
        assert!(!graph.notifications.is_empty());
    }

    #[test]
    fn vertex_chain_is_collected() {
        let mut poly = crate::entities::Polyline2D::default();
        poly.first_vertex = unresolved(2);
        poly.last_vertex = unresolved(3);
        poly.seqend = unresolved(4);

        let mut graph = graph_with(vec![
            DwgObject {
                header: ObjectHeader::default(),
                variant: ObjectVariant::Polyline2D(poly),
            },
            entity_at(unresolved(3)),
            entity_at(unresolved(4)),
            DwgObject {
                header: ObjectHeader::default(),
                variant: ObjectVariant::SeqEnd(SeqEnd::default()),
            },
        ]);

        link_graph(&mut graph);

        match &graph.objects[0].variant {
            ObjectVariant::Polyline2D(p) => {
                assert_eq!(
                    p.vertices,
                    vec![ObjectRef::Index(1), ObjectRef::Index(2)]
                );
                assert_eq!(p.seqend, ObjectRef::Index(3));
            }
            _ => panic!("expected polyline"),
        }
    }

    #[test]
    fn chain_cycle_terminates() {
        let mut poly = crate::entities::Polyline2D::default();
        poly.first_vertex = unresolved(2);
        poly.last_vertex = unresolved(3);

        // Vertex 2 points back at itself.
        let mut graph = graph_with(vec![
            DwgObject {
                header: ObjectHeader::default(),
                variant: ObjectVariant::Polyline2D(poly),
            },
            entity_at(unresolved(2)),
        ]);

        link_graph(&mut graph);

        match &graph.objects[0].variant {
            ObjectVariant::Polyline2D(p) => {
                assert_eq!(p.vertices.len(), graph.objects.len());
            }
            _ => panic!("expected polyline"),
        }
    }
}
